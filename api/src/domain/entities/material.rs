//! Material domain entity
//!
//! Tracks how much of a material a project needs and how much has been acquired.

use serde::Serialize;

use super::project::ProjectId;

entity_id!(
    /// Unique identifier for a material line
    MaterialId
);

#[derive(Debug, Clone, Serialize)]
pub struct Material {
    pub id: MaterialId,
    pub project_id: ProjectId,
    pub name: String,
    pub qty_needed: i32,
    pub qty_acquired: i32,
    /// Unit of measurement, e.g. `pcs` or `tons`
    pub unit: String,
}

impl Material {
    pub fn apply(&mut self, changes: &MaterialChanges) {
        if let Some(project_id) = changes.project_id {
            self.project_id = project_id;
        }
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(qty_needed) = changes.qty_needed {
            self.qty_needed = qty_needed;
        }
        if let Some(qty_acquired) = changes.qty_acquired {
            self.qty_acquired = qty_acquired;
        }
        if let Some(unit) = &changes.unit {
            self.unit = unit.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub id: Option<MaterialId>,
    pub project_id: ProjectId,
    pub name: String,
    pub qty_needed: i32,
    pub qty_acquired: i32,
    pub unit: String,
}

#[derive(Debug, Clone, Default)]
pub struct MaterialChanges {
    pub project_id: Option<ProjectId>,
    pub name: Option<String>,
    pub qty_needed: Option<i32>,
    pub qty_acquired: Option<i32>,
    pub unit: Option<String>,
}

impl MaterialChanges {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.project_id.is_none()
            && self.name.is_none()
            && self.qty_needed.is_none()
            && self.qty_acquired.is_none()
            && self.unit.is_none()
    }
}
