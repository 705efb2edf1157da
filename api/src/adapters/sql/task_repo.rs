//! SQL adapter for TaskRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::entities::{NewTask, Page, ProjectId, Status, Task, TaskChanges, TaskId};
use crate::domain::ports::TaskRepository;
use crate::entity::tasks;
use crate::error::DomainError;

use super::db_error;

/// SeaORM implementation of TaskRepository
pub struct SqlTaskRepository {
    db: DatabaseConnection,
}

impl SqlTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for SqlTaskRepository {
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, DomainError> {
        let result = tasks::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
        page: &Page,
    ) -> Result<Vec<Task>, DomainError> {
        let results = tasks::Entity::find()
            .filter(tasks::Column::ProjectId.eq(project_id.0))
            .order_by_asc(tasks::Column::Name)
            .order_by_asc(tasks::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, task: &NewTask) -> Result<Task, DomainError> {
        let id = task.id.unwrap_or_default();

        let model = tasks::ActiveModel {
            id: Set(id.0),
            project_id: Set(task.project_id.0),
            name: Set(task.name.clone()),
            description: Set(task.description.clone()),
            due_date: Set(task.due_date),
            status: Set(task.status.to_string()),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn update(&self, id: &TaskId, changes: &TaskChanges) -> Result<Task, DomainError> {
        let existing = tasks::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::NotFound(format!("Task with id {} not found", id)))?;

        if changes.is_empty() {
            return Ok(existing.into());
        }

        let mut active_model = existing.into_active_model();
        if let Some(project_id) = changes.project_id {
            active_model.project_id = Set(project_id.0);
        }
        if let Some(name) = &changes.name {
            active_model.name = Set(name.clone());
        }
        if let Some(description) = &changes.description {
            active_model.description = Set(description.clone());
        }
        if let Some(due_date) = changes.due_date {
            active_model.due_date = Set(due_date);
        }
        if let Some(status) = changes.status {
            active_model.status = Set(status.to_string());
        }

        let result = active_model.update(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), DomainError> {
        let result = tasks::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!("Task with id {} not found", id)))
        } else {
            Ok(())
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<tasks::Model> for Task {
    fn from(model: tasks::Model) -> Self {
        Task {
            id: TaskId(model.id),
            project_id: ProjectId(model.project_id),
            name: model.name,
            description: model.description,
            due_date: model.due_date,
            status: model.status.parse().unwrap_or(Status::Pending),
        }
    }
}
