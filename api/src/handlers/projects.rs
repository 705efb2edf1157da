//! Project handlers
//!
//! CRUD, per-owner listing, financial summary and cost recording.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::envelope::{acknowledged, collection, entity, Acknowledged, Envelope};
use super::extract::{non_null, ApiJson, ApiPath, ApiQuery};
use super::users::UserSummary;
use super::default_limit;
use crate::app::CostInput;
use crate::domain::entities::{
    CostEntry, FinancialSummary, NewProject, Page, Project, ProjectChanges, ProjectId, Status,
    User, UserId, UNKNOWN_VENDOR,
};
use crate::error::AppError;
use crate::AppState;

/// Request to create a project
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub project_id: Option<Uuid>,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: f64,
    pub status: Status,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub total_budget: Option<f64>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<Status>,
}

/// Request to record a cost
#[derive(Debug, Deserialize)]
pub struct CreateCostRequest {
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(default = "unknown_vendor")]
    pub vendor_name: String,
}

fn unknown_vendor() -> String {
    UNKNOWN_VENDOR.to_string()
}

/// Query parameters for listing a user's projects
#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub user_id: Uuid,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// Project fields without the owner
#[derive(Debug, Serialize)]
pub struct ProjectAttribute {
    pub id: ProjectId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_budget: f64,
    pub status: Status,
}

impl From<Project> for ProjectAttribute {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            name: p.name,
            description: p.description,
            start_date: p.start_date,
            end_date: p.end_date,
            total_budget: p.total_budget,
            status: p.status,
        }
    }
}

/// A project with its owner
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: ProjectAttribute,
    pub owner: Option<UserSummary>,
}

impl ProjectResponse {
    fn new(project: Project, owner: Option<User>) -> Self {
        Self {
            project: project.into(),
            owner: owner.map(UserSummary::from),
        }
    }
}

/// GET /project/:id
pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<ProjectResponse>>, AppError> {
    let (project, owner) = state.project_service.get(&ProjectId(id)).await?;
    Ok(entity(ProjectResponse::new(project, owner)))
}

/// POST /project
pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateProjectRequest>,
) -> Result<Json<Envelope<ProjectResponse>>, AppError> {
    let (project, owner) = state
        .project_service
        .create(NewProject {
            id: req.project_id.map(ProjectId),
            user_id: UserId(req.user_id),
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            total_budget: req.total_budget,
            status: req.status,
        })
        .await?;

    Ok(entity(ProjectResponse::new(project, owner)))
}

/// PATCH /project/:id
pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateProjectRequest>,
) -> Result<Json<Envelope<ProjectResponse>>, AppError> {
    let changes = ProjectChanges {
        user_id: req.user_id.map(UserId),
        name: req.name,
        description: req.description,
        start_date: req.start_date,
        end_date: req.end_date,
        total_budget: req.total_budget,
        status: req.status,
    };

    let (project, owner) = state
        .project_service
        .update(&ProjectId(id), changes)
        .await?;

    Ok(entity(ProjectResponse::new(project, owner)))
}

/// DELETE /project/:id
pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Acknowledged>, AppError> {
    state.project_service.delete(&ProjectId(id)).await?;
    Ok(acknowledged())
}

/// GET /project/:id/financials
pub async fn get_financials(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<FinancialSummary>>, AppError> {
    let summary = state.project_service.financials(&ProjectId(id)).await?;
    Ok(entity(summary))
}

/// POST /project/:id/costs
pub async fn add_cost(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CreateCostRequest>,
) -> Result<Json<Envelope<CostEntry>>, AppError> {
    let cost = state
        .project_service
        .add_cost(
            &ProjectId(id),
            CostInput {
                description: req.description,
                amount: req.amount,
                category: req.category,
                vendor_name: req.vendor_name,
            },
        )
        .await?;

    Ok(entity(cost))
}

/// GET /project?user_id=&limit=&offset=
///
/// Projects of a user ordered by end date. An empty list is still a 200.
pub async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListProjectsQuery>,
) -> Result<Json<Envelope<Vec<ProjectAttribute>>>, AppError> {
    let page = Page::new(query.limit, query.offset)?;
    let projects = state
        .project_service
        .list(&UserId(query.user_id), page)
        .await?;

    Ok(collection(
        projects.into_iter().map(ProjectAttribute::from).collect(),
    ))
}
