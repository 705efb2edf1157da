//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports, and record
//! every completed action in the activity log.

pub mod activity_service;
pub mod auth_service;
pub mod material_service;
pub mod project_service;
pub mod task_service;
pub mod user_service;

pub use activity_service::ActivityService;
pub use auth_service::{AuthService, SignupInput};
pub use material_service::MaterialService;
pub use project_service::{CostInput, ProjectService};
pub use task_service::TaskService;
pub use user_service::UserService;
