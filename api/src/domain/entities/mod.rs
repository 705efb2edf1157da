//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

/// Declare a UUID-backed identifier newtype
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub uuid::Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod activity_log;
pub mod cost_entry;
pub mod credential;
pub mod material;
pub mod page;
pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use activity_log::{Action, ActivityLog, ActivityLogId, NewActivityLog};
pub use cost_entry::{
    CostEntry, CostEntryId, FinancialSummary, NewCostEntry, UNKNOWN_VENDOR,
};
pub use credential::{Credential, NewCredential};
pub use material::{Material, MaterialChanges, MaterialId, NewMaterial};
pub use page::{Page, DEFAULT_LIMIT};
pub use project::{NewProject, Project, ProjectChanges, ProjectId};
pub use status::Status;
pub use task::{NewTask, Task, TaskChanges, TaskId};
pub use user::{NewUser, User, UserId};
