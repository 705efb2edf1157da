//! SQL adapter for ProjectRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use crate::domain::entities::{
    NewProject, Page, Project, ProjectChanges, ProjectId, Status, UserId,
};
use crate::domain::ports::ProjectRepository;
use crate::entity::{cost_entries, materials, projects, tasks};
use crate::error::DomainError;

use super::db_error;

/// SeaORM implementation of ProjectRepository
pub struct SqlProjectRepository {
    db: DatabaseConnection,
}

impl SqlProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for SqlProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let result = projects::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_owner(
        &self,
        owner: &UserId,
        page: &Page,
    ) -> Result<Vec<Project>, DomainError> {
        let results = projects::Entity::find()
            .filter(projects::Column::UserId.eq(owner.0))
            .order_by_asc(projects::Column::EndDate)
            .order_by_asc(projects::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all_by_owner(&self, owner: &UserId) -> Result<Vec<Project>, DomainError> {
        let results = projects::Entity::find()
            .filter(projects::Column::UserId.eq(owner.0))
            .order_by_asc(projects::Column::EndDate)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, project: &NewProject) -> Result<Project, DomainError> {
        let id = project.id.unwrap_or_default();

        let model = projects::ActiveModel {
            id: Set(id.0),
            user_id: Set(project.user_id.0),
            name: Set(project.name.clone()),
            description: Set(project.description.clone()),
            start_date: Set(project.start_date),
            end_date: Set(project.end_date),
            total_budget: Set(project.total_budget),
            status: Set(project.status.to_string()),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &ProjectId,
        changes: &ProjectChanges,
    ) -> Result<Project, DomainError> {
        let existing = projects::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::NotFound(format!("Project with id {} not found", id)))?;

        if changes.is_empty() {
            return Ok(existing.into());
        }

        let mut active_model = existing.into_active_model();
        if let Some(user_id) = changes.user_id {
            active_model.user_id = Set(user_id.0);
        }
        if let Some(name) = &changes.name {
            active_model.name = Set(name.clone());
        }
        if let Some(description) = &changes.description {
            active_model.description = Set(description.clone());
        }
        if let Some(start_date) = changes.start_date {
            active_model.start_date = Set(start_date);
        }
        if let Some(end_date) = changes.end_date {
            active_model.end_date = Set(end_date);
        }
        if let Some(total_budget) = changes.total_budget {
            active_model.total_budget = Set(total_budget);
        }
        if let Some(status) = changes.status {
            active_model.status = Set(status.to_string());
        }

        let result = active_model.update(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        tasks::Entity::delete_many()
            .filter(tasks::Column::ProjectId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        materials::Entity::delete_many()
            .filter(materials::Column::ProjectId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(db_error)?;
        cost_entries::Entity::delete_many()
            .filter(cost_entries::Column::ProjectId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        let result = projects::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_error)?;
            return Err(DomainError::NotFound(format!(
                "Project with id {} not found",
                id
            )));
        }

        txn.commit().await.map_err(db_error)?;
        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<projects::Model> for Project {
    fn from(model: projects::Model) -> Self {
        Project {
            id: ProjectId(model.id),
            user_id: UserId(model.user_id),
            name: model.name,
            description: model.description,
            start_date: model.start_date,
            end_date: model.end_date,
            total_budget: model.total_budget,
            status: model.status.parse().unwrap_or(Status::Pending),
        }
    }
}
