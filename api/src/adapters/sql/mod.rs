//! SQL adapters
//!
//! Implementations of repository traits using SeaORM. Works against
//! PostgreSQL and SQLite.

pub mod activity_log_repo;
pub mod cost_entry_repo;
pub mod credential_repo;
pub mod material_repo;
pub mod project_repo;
pub mod schema;
pub mod task_repo;
pub mod user_repo;


use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

pub use activity_log_repo::SqlActivityLogRepository;
pub use cost_entry_repo::SqlCostEntryRepository;
pub use credential_repo::SqlCredentialRepository;
pub use material_repo::SqlMaterialRepository;
pub use project_repo::SqlProjectRepository;
pub use schema::init_db;
pub use task_repo::SqlTaskRepository;
pub use user_repo::SqlUserRepository;

/// Map a SeaORM error, surfacing constraint violations as conflicts
fn db_error(err: DbErr) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Conflict(msg),
        _ => DomainError::Database(err.to_string()),
    }
}
