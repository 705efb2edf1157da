//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., SeaORM over SQL).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    ActivityLog, ActivityLogId, CostEntry, Credential, Material, MaterialChanges, MaterialId,
    NewActivityLog, NewCostEntry, NewCredential, NewMaterial, NewProject, NewTask, NewUser, Page,
    Project, ProjectChanges, ProjectId, Task, TaskChanges, TaskId, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Delete a user (cascades to credentials and owned projects)
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

/// Repository for login credentials
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Find the credential belonging to a user
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Credential>, DomainError>;

    /// Store a password hash for a user
    async fn create(&self, credential: &NewCredential) -> Result<Credential, DomainError>;

    /// Remember the latest refresh token issued to a user
    async fn store_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
}

/// Repository for Project entities
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// Projects owned by a user, ordered by end date
    async fn find_by_owner(&self, owner: &UserId, page: &Page)
        -> Result<Vec<Project>, DomainError>;

    /// Every project owned by a user, ordered by end date
    async fn find_all_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, DomainError>;

    async fn create(&self, project: &NewProject) -> Result<Project, DomainError>;

    /// Apply a partial update and return the stored row
    async fn update(
        &self,
        id: &ProjectId,
        changes: &ProjectChanges,
    ) -> Result<Project, DomainError>;

    /// Delete a project together with its tasks, materials and costs
    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError>;
}

/// Repository for Task entities
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError>;

    /// Tasks of a project, ordered by name
    async fn find_by_project(
        &self,
        project_id: &ProjectId,
        page: &Page,
    ) -> Result<Vec<Task>, DomainError>;

    async fn create(&self, task: &NewTask) -> Result<Task, DomainError>;

    async fn update(&self, id: &TaskId, changes: &TaskChanges) -> Result<Task, DomainError>;

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError>;
}

/// Repository for Material entities
#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn find_by_id(&self, id: &MaterialId) -> Result<Option<Material>, DomainError>;

    /// Materials of a project, ordered by name
    async fn find_by_project(
        &self,
        project_id: &ProjectId,
        page: &Page,
    ) -> Result<Vec<Material>, DomainError>;

    async fn create(&self, material: &NewMaterial) -> Result<Material, DomainError>;

    async fn update(
        &self,
        id: &MaterialId,
        changes: &MaterialChanges,
    ) -> Result<Material, DomainError>;

    async fn delete(&self, id: &MaterialId) -> Result<(), DomainError>;
}

/// Repository for project cost entries
#[async_trait]
pub trait CostEntryRepository: Send + Sync {
    /// Every cost recorded against a project, oldest first
    async fn find_by_project(&self, project_id: &ProjectId)
        -> Result<Vec<CostEntry>, DomainError>;

    async fn create(&self, cost: &NewCostEntry) -> Result<CostEntry, DomainError>;
}

/// Repository for the activity log (append-only)
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    async fn find_by_id(&self, id: &ActivityLogId) -> Result<Option<ActivityLog>, DomainError>;

    async fn create(&self, entry: &NewActivityLog) -> Result<ActivityLog, DomainError>;
}
