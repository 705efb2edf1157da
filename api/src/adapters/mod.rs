//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod sql;

pub use sql::{
    init_db, SqlActivityLogRepository, SqlCostEntryRepository, SqlCredentialRepository,
    SqlMaterialRepository, SqlProjectRepository, SqlTaskRepository, SqlUserRepository,
};
