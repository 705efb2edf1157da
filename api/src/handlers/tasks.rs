//! Task handlers

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::default_limit;
use super::envelope::{acknowledged, collection, entity, Acknowledged, Envelope};
use super::extract::{non_null, ApiJson, ApiPath, ApiQuery};
use crate::domain::entities::{NewTask, Page, ProjectId, Status, Task, TaskChanges, TaskId};
use crate::error::AppError;
use crate::AppState;

/// Request to create a task
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub task_id: Option<Uuid>,
    pub project_id: Uuid,
    pub name: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub project_id: Option<Uuid>,
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "non_null")]
    pub status: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    pub project_id: Uuid,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// GET /task/:id
pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<Task>>, AppError> {
    let task = state.task_service.get(&TaskId(id)).await?;
    Ok(entity(task))
}

/// POST /task
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> Result<Json<Envelope<Task>>, AppError> {
    let task = state
        .task_service
        .create(NewTask {
            id: req.task_id.map(TaskId),
            project_id: ProjectId(req.project_id),
            name: req.name,
            description: req.description,
            due_date: req.due_date,
            status: req.status,
        })
        .await?;

    Ok(entity(task))
}

/// PATCH /task/:id
pub async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> Result<Json<Envelope<Task>>, AppError> {
    let changes = TaskChanges {
        project_id: req.project_id.map(ProjectId),
        name: req.name,
        description: req.description,
        due_date: req.due_date,
        status: req.status,
    };

    let task = state.task_service.update(&TaskId(id), changes).await?;
    Ok(entity(task))
}

/// DELETE /task/:id
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Acknowledged>, AppError> {
    state.task_service.delete(&TaskId(id)).await?;
    Ok(acknowledged())
}

/// GET /task?project_id=&limit=&offset=
pub async fn list_tasks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListTasksQuery>,
) -> Result<Json<Envelope<Vec<Task>>>, AppError> {
    let page = Page::new(query.limit, query.offset)?;
    let tasks = state
        .task_service
        .list(&ProjectId(query.project_id), page)
        .await?;

    Ok(collection(tasks))
}
