//! SQL adapter for CostEntryRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::entities::{CostEntry, CostEntryId, NewCostEntry, ProjectId};
use crate::domain::ports::CostEntryRepository;
use crate::entity::cost_entries;
use crate::error::DomainError;

use super::db_error;

/// SeaORM implementation of CostEntryRepository
pub struct SqlCostEntryRepository {
    db: DatabaseConnection,
}

impl SqlCostEntryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CostEntryRepository for SqlCostEntryRepository {
    async fn find_by_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<CostEntry>, DomainError> {
        let results = cost_entries::Entity::find()
            .filter(cost_entries::Column::ProjectId.eq(project_id.0))
            .order_by_asc(cost_entries::Column::DateIncurred)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, cost: &NewCostEntry) -> Result<CostEntry, DomainError> {
        let model = cost_entries::ActiveModel {
            id: Set(CostEntryId::new().0),
            project_id: Set(cost.project_id.0),
            description: Set(cost.description.clone()),
            amount: Set(cost.amount),
            category: Set(cost.category.clone()),
            vendor_name: Set(cost.vendor_name.clone()),
            date_incurred: Set(cost.date_incurred),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<cost_entries::Model> for CostEntry {
    fn from(model: cost_entries::Model) -> Self {
        CostEntry {
            id: CostEntryId(model.id),
            project_id: ProjectId(model.project_id),
            description: model.description,
            amount: model.amount,
            category: model.category,
            vendor_name: model.vendor_name,
            date_incurred: model.date_incurred,
        }
    }
}
