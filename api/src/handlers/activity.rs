//! Activity log handlers (read-only)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::envelope::{entity, Envelope};
use super::extract::ApiPath;
use crate::domain::entities::{ActivityLog, ActivityLogId, ProjectId, UserId};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ActivityLogResponse {
    pub activity_id: ActivityLogId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub status_code: i32,
    pub action_type: String,
    pub action_desc: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<ActivityLog> for ActivityLogResponse {
    fn from(log: ActivityLog) -> Self {
        Self {
            activity_id: log.id,
            user_id: log.user_id,
            project_id: log.project_id,
            status_code: log.status_code,
            action_type: log.action_type,
            action_desc: log.action_desc,
            details: log.details,
            timestamp: log.timestamp,
        }
    }
}

/// GET /activity_log/:id
pub async fn get_activity_log(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<ActivityLogResponse>>, AppError> {
    let log = state.activity_service.get(&ActivityLogId(id)).await?;
    Ok(entity(log.into()))
}
