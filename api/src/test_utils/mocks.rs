//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    ActivityLog, ActivityLogId, CostEntry, CostEntryId, Credential, Material, MaterialChanges,
    MaterialId, NewActivityLog, NewCostEntry, NewCredential, NewMaterial, NewProject, NewTask,
    NewUser, Page, Project, ProjectChanges, ProjectId, Task, TaskChanges, TaskId, User, UserId,
};
use crate::domain::ports::{
    ActivityLogRepository, CostEntryRepository, CredentialRepository, MaterialRepository,
    ProjectRepository, TaskRepository, UserRepository,
};
use crate::error::DomainError;

/// Apply a page window to an already ordered list
fn paginate<T>(items: Vec<T>, page: &Page) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset as usize)
        .take(page.limit as usize)
        .collect()
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.username.as_deref() == Some(username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.email == new_user.email) {
            return Err(DomainError::Conflict("email".to_string()));
        }

        let user = User {
            id: new_user.id.unwrap_or_default(),
            username: new_user.username.clone(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            is_active: true,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        match self.users.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("User with id {} not found", id))),
        }
    }
}

// ============================================================================
// In-Memory Credential Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<UserId, Credential>>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Credential>, DomainError> {
        Ok(self.credentials.read().unwrap().get(user_id).cloned())
    }

    async fn create(&self, credential: &NewCredential) -> Result<Credential, DomainError> {
        let stored = Credential {
            user_id: credential.user_id,
            password_hash: credential.password_hash.clone(),
            refresh_token: None,
            refresh_token_expires: None,
        };
        self.credentials
            .write()
            .unwrap()
            .insert(stored.user_id, stored.clone());
        Ok(stored)
    }

    async fn store_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut credentials = self.credentials.write().unwrap();
        match credentials.get_mut(user_id) {
            Some(credential) => {
                credential.refresh_token = Some(token.to_string());
                credential.refresh_token_expires = Some(expires_at);
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "Credential for user {} not found",
                user_id
            ))),
        }
    }
}

/// Credential store whose writes always fail
pub struct FailingCredentialRepository;

#[async_trait]
impl CredentialRepository for FailingCredentialRepository {
    async fn find_by_user(&self, _user_id: &UserId) -> Result<Option<Credential>, DomainError> {
        Ok(None)
    }

    async fn create(&self, _credential: &NewCredential) -> Result<Credential, DomainError> {
        Err(DomainError::Database("credential store unavailable".to_string()))
    }

    async fn store_refresh_token(
        &self,
        _user_id: &UserId,
        _token: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        Err(DomainError::Database("credential store unavailable".to_string()))
    }
}

// ============================================================================
// In-Memory Project Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a project for testing
    pub fn with_project(self, project: Project) -> Self {
        self.projects.write().unwrap().insert(project.id, project);
        self
    }

    fn owned_by(&self, owner: &UserId) -> Vec<Project> {
        let projects = self.projects.read().unwrap();
        let mut owned: Vec<Project> = projects
            .values()
            .filter(|p| p.user_id == *owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.end_date.cmp(&b.end_date).then(a.id.0.cmp(&b.id.0)));
        owned
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        Ok(self.projects.read().unwrap().get(id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        page: &Page,
    ) -> Result<Vec<Project>, DomainError> {
        Ok(paginate(self.owned_by(owner), page))
    }

    async fn find_all_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, DomainError> {
        Ok(self.owned_by(owner))
    }

    async fn create(&self, new_project: &NewProject) -> Result<Project, DomainError> {
        let project = Project {
            id: new_project.id.unwrap_or_default(),
            user_id: new_project.user_id,
            name: new_project.name.clone(),
            description: new_project.description.clone(),
            start_date: new_project.start_date,
            end_date: new_project.end_date,
            total_budget: new_project.total_budget,
            status: new_project.status,
        };
        self.projects
            .write()
            .unwrap()
            .insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(
        &self,
        id: &ProjectId,
        changes: &ProjectChanges,
    ) -> Result<Project, DomainError> {
        let mut projects = self.projects.write().unwrap();
        let project = projects
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Project with id {} not found", id)))?;
        project.apply(changes);
        Ok(project.clone())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        match self.projects.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!(
                "Project with id {} not found",
                id
            ))),
        }
    }
}

// ============================================================================
// In-Memory Task Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a task for testing
    pub fn with_task(self, task: Task) -> Self {
        self.tasks.write().unwrap().insert(task.id, task);
        self
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        Ok(self.tasks.read().unwrap().get(id).cloned())
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
        page: &Page,
    ) -> Result<Vec<Task>, DomainError> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .unwrap()
            .values()
            .filter(|t| t.project_id == *project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(tasks, page))
    }

    async fn create(&self, new_task: &NewTask) -> Result<Task, DomainError> {
        let task = Task {
            id: new_task.id.unwrap_or_default(),
            project_id: new_task.project_id,
            name: new_task.name.clone(),
            description: new_task.description.clone(),
            due_date: new_task.due_date,
            status: new_task.status,
        };
        self.tasks.write().unwrap().insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, changes: &TaskChanges) -> Result<Task, DomainError> {
        let mut tasks = self.tasks.write().unwrap();
        let task = tasks
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Task with id {} not found", id)))?;
        task.apply(changes);
        Ok(task.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        match self.tasks.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Task with id {} not found", id))),
        }
    }
}

// ============================================================================
// In-Memory Material Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryMaterialRepository {
    materials: Arc<RwLock<HashMap<MaterialId, Material>>>,
}

impl InMemoryMaterialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a material for testing
    pub fn with_material(self, material: Material) -> Self {
        self.materials
            .write()
            .unwrap()
            .insert(material.id, material);
        self
    }
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn find_by_id(&self, id: &MaterialId) -> Result<Option<Material>, DomainError> {
        Ok(self.materials.read().unwrap().get(id).cloned())
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
        page: &Page,
    ) -> Result<Vec<Material>, DomainError> {
        let mut materials: Vec<Material> = self
            .materials
            .read()
            .unwrap()
            .values()
            .filter(|m| m.project_id == *project_id)
            .cloned()
            .collect();
        materials.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(materials, page))
    }

    async fn create(&self, new_material: &NewMaterial) -> Result<Material, DomainError> {
        let material = Material {
            id: new_material.id.unwrap_or_default(),
            project_id: new_material.project_id,
            name: new_material.name.clone(),
            qty_needed: new_material.qty_needed,
            qty_acquired: new_material.qty_acquired,
            unit: new_material.unit.clone(),
        };
        self.materials
            .write()
            .unwrap()
            .insert(material.id, material.clone());
        Ok(material)
    }

    async fn update(
        &self,
        id: &MaterialId,
        changes: &MaterialChanges,
    ) -> Result<Material, DomainError> {
        let mut materials = self.materials.write().unwrap();
        let material = materials.get_mut(id).ok_or_else(|| {
            DomainError::NotFound(format!("Material with id {} not found", id))
        })?;
        material.apply(changes);
        Ok(material.clone())
    }

    async fn delete(&self, id: &MaterialId) -> Result<(), DomainError> {
        match self.materials.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!(
                "Material with id {} not found",
                id
            ))),
        }
    }
}

// ============================================================================
// In-Memory Cost Entry Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryCostEntryRepository {
    costs: Arc<RwLock<Vec<CostEntry>>>,
}

impl InMemoryCostEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CostEntryRepository for InMemoryCostEntryRepository {
    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<CostEntry>, DomainError> {
        let costs = self.costs.read().unwrap();
        Ok(costs
            .iter()
            .filter(|c| c.project_id == *project_id)
            .cloned()
            .collect())
    }

    async fn create(&self, cost: &NewCostEntry) -> Result<CostEntry, DomainError> {
        let entry = CostEntry {
            id: CostEntryId::new(),
            project_id: cost.project_id,
            description: cost.description.clone(),
            amount: cost.amount,
            category: cost.category.clone(),
            vendor_name: cost.vendor_name.clone(),
            date_incurred: cost.date_incurred,
        };
        self.costs.write().unwrap().push(entry.clone());
        Ok(entry)
    }
}

// ============================================================================
// In-Memory Activity Log Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryActivityLogRepository {
    entries: Arc<RwLock<Vec<ActivityLog>>>,
}

impl InMemoryActivityLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded row, oldest first
    pub fn entries(&self) -> Vec<ActivityLog> {
        self.entries.read().unwrap().clone()
    }

    /// Action types of every recorded row, oldest first
    pub fn actions(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .map(|e| e.action_type.clone())
            .collect()
    }
}

#[async_trait]
impl ActivityLogRepository for InMemoryActivityLogRepository {
    async fn find_by_id(&self, id: &ActivityLogId) -> Result<Option<ActivityLog>, DomainError> {
        let entries = self.entries.read().unwrap();
        Ok(entries.iter().find(|e| e.id == *id).cloned())
    }

    async fn create(&self, entry: &NewActivityLog) -> Result<ActivityLog, DomainError> {
        let stored = ActivityLog {
            id: ActivityLogId::new(),
            user_id: entry.user_id,
            project_id: entry.project_id,
            status_code: entry.status_code,
            action_type: entry.action_type.to_string(),
            action_desc: entry.action_desc.clone(),
            details: entry.details.clone(),
            timestamp: Utc::now(),
        };
        self.entries.write().unwrap().push(stored.clone());
        Ok(stored)
    }
}

/// Activity log whose writes always fail
pub struct FailingActivityLogRepository;

#[async_trait]
impl ActivityLogRepository for FailingActivityLogRepository {
    async fn find_by_id(&self, _id: &ActivityLogId) -> Result<Option<ActivityLog>, DomainError> {
        Ok(None)
    }

    async fn create(&self, _entry: &NewActivityLog) -> Result<ActivityLog, DomainError> {
        Err(DomainError::Database("activity log unavailable".to_string()))
    }
}
