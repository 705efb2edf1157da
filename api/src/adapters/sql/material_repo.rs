//! SQL adapter for MaterialRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::entities::{
    Material, MaterialChanges, MaterialId, NewMaterial, Page, ProjectId,
};
use crate::domain::ports::MaterialRepository;
use crate::entity::materials;
use crate::error::DomainError;

use super::db_error;

/// SeaORM implementation of MaterialRepository
pub struct SqlMaterialRepository {
    db: DatabaseConnection,
}

impl SqlMaterialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaterialRepository for SqlMaterialRepository {
    async fn find_by_id(&self, id: &MaterialId) -> Result<Option<Material>, DomainError> {
        let result = materials::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_project(
        &self,
        project_id: &ProjectId,
        page: &Page,
    ) -> Result<Vec<Material>, DomainError> {
        let results = materials::Entity::find()
            .filter(materials::Column::ProjectId.eq(project_id.0))
            .order_by_asc(materials::Column::Name)
            .order_by_asc(materials::Column::Id)
            .offset(page.offset)
            .limit(page.limit)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, material: &NewMaterial) -> Result<Material, DomainError> {
        let id = material.id.unwrap_or_default();

        let model = materials::ActiveModel {
            id: Set(id.0),
            project_id: Set(material.project_id.0),
            name: Set(material.name.clone()),
            qty_needed: Set(material.qty_needed),
            qty_acquired: Set(material.qty_acquired),
            unit: Set(material.unit.clone()),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &MaterialId,
        changes: &MaterialChanges,
    ) -> Result<Material, DomainError> {
        let existing = materials::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("Material with id {} not found", id))
            })?;

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
        if let Some(qty_needed) = changes.qty_needed {
            active_model.qty_needed = Set(qty_needed);
        }
        if let Some(qty_acquired) = changes.qty_acquired {
            active_model.qty_acquired = Set(qty_acquired);
        }
        if let Some(unit) = &changes.unit {
            active_model.unit = Set(unit.clone());
        }

        let result = active_model.update(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn delete(&self, id: &MaterialId) -> Result<(), DomainError> {
        let result = materials::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!(
                "Material with id {} not found",
                id
            )))
        } else {
            Ok(())
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<materials::Model> for Material {
    fn from(model: materials::Model) -> Self {
        Material {
            id: MaterialId(model.id),
            project_id: ProjectId(model.project_id),
            name: model.name,
            qty_needed: model.qty_needed,
            qty_acquired: model.qty_acquired,
            unit: model.unit,
        }
    }
}
