//! Material handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use super::default_limit;
use super::envelope::{acknowledged, collection, entity, Acknowledged, Envelope};
use super::extract::{non_null, ApiJson, ApiPath, ApiQuery};
use crate::domain::entities::{
    Material, MaterialChanges, MaterialId, NewMaterial, Page, ProjectId,
};
use crate::error::AppError;
use crate::AppState;

/// Request to create a material
#[derive(Debug, Deserialize)]
pub struct CreateMaterialRequest {
    pub material_id: Option<Uuid>,
    pub project_id: Uuid,
    pub name: String,
    pub qty_needed: i32,
    pub qty_acquired: i32,
    pub unit: String,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateMaterialRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub project_id: Option<Uuid>,
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub qty_needed: Option<i32>,
    #[serde(default, deserialize_with = "non_null")]
    pub qty_acquired: Option<i32>,
    #[serde(default, deserialize_with = "non_null")]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListMaterialsQuery {
    pub project_id: Uuid,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// GET /material/:id
pub async fn get_material(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Material>>, AppError> {
    let material = state.material_service.get(&MaterialId(id)).await?;
    Ok(entity(material))
}

/// POST /material
pub async fn create_material(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateMaterialRequest>,
) -> Result<Json<Envelope<Material>>, AppError> {
    let material = state
        .material_service
        .create(NewMaterial {
            id: req.material_id.map(MaterialId),
            project_id: ProjectId(req.project_id),
            name: req.name,
            qty_needed: req.qty_needed,
            qty_acquired: req.qty_acquired,
            unit: req.unit,
        })
        .await?;

    Ok(entity(material))
}

/// PATCH /material/:id
pub async fn update_material(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateMaterialRequest>,
) -> Result<Json<Envelope<Material>>, AppError> {
    let changes = MaterialChanges {
        project_id: req.project_id.map(ProjectId),
        name: req.name,
        qty_needed: req.qty_needed,
        qty_acquired: req.qty_acquired,
        unit: req.unit,
    };

    let material = state
        .material_service
        .update(&MaterialId(id), changes)
        .await?;
    Ok(entity(material))
}

/// DELETE /material/:id
pub async fn delete_material(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Acknowledged>, AppError> {
    state.material_service.delete(&MaterialId(id)).await?;
    Ok(acknowledged())
}

/// GET /material?project_id=&limit=&offset=
pub async fn list_materials(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListMaterialsQuery>,
) -> Result<Json<Envelope<Vec<Material>>>, AppError> {
    let page = Page::new(query.limit, query.offset)?;
    let materials = state
        .material_service
        .list(&ProjectId(query.project_id), page)
        .await?;

    Ok(collection(materials))
}
