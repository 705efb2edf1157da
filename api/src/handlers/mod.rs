//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod activity;
pub mod auth;
pub mod envelope;
pub mod extract;
pub mod failures;
pub mod health;
pub mod materials;
pub mod projects;
pub mod tasks;
pub mod users;

use crate::domain::entities::DEFAULT_LIMIT;

pub use activity::get_activity_log;
pub use auth::{login, signup};
pub use failures::{handle_panic, not_found, record_failures};
pub use health::health;
pub use materials::{
    create_material, delete_material, get_material, list_materials, update_material,
};
pub use projects::{
    add_cost, create_project, delete_project, get_financials, get_project, list_projects,
    update_project,
};
pub use tasks::{create_task, delete_task, get_task, list_tasks, update_task};
pub use users::{create_user, get_user};

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}
