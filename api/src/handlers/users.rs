//! User handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::envelope::{entity, Envelope};
use super::extract::{ApiJson, ApiPath};
use super::projects::ProjectAttribute;
use crate::domain::entities::{NewUser, User, UserId};
use crate::error::AppError;
use crate::AppState;

/// Request to create a user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: Option<Uuid>,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
}

/// Short form of a user, embedded in project responses
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
        }
    }
}

/// A user with the projects they own
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    pub projects: Vec<ProjectAttribute>,
}

impl UserResponse {
    fn new(user: User, projects: Vec<ProjectAttribute>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            projects,
        }
    }
}

/// GET /user/:id
pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Envelope<UserResponse>>, AppError> {
    let (user, projects) = state.user_service.get(&UserId(id)).await?;

    Ok(entity(UserResponse::new(
        user,
        projects.into_iter().map(ProjectAttribute::from).collect(),
    )))
}

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<Json<Envelope<UserResponse>>, AppError> {
    let user = state
        .user_service
        .create(NewUser {
            id: req.user_id.map(UserId),
            username: req.username,
            name: req.name,
            email: req.email,
        })
        .await?;

    Ok(entity(UserResponse::new(user, Vec::new())))
}
