//! User service
//!
//! Creates users and looks them up together with the projects they own.

use std::sync::Arc;

use crate::domain::entities::{NewUser, Project, User, UserId};
use crate::domain::ports::{ProjectRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Service for managing users
pub struct UserService<UR, PR>
where
    UR: UserRepository,
    PR: ProjectRepository,
{
    users: Arc<UR>,
    projects: Arc<PR>,
}

impl<UR, PR> UserService<UR, PR>
where
    UR: UserRepository,
    PR: ProjectRepository,
{
    pub fn new(users: Arc<UR>, projects: Arc<PR>) -> Self {
        Self { users, projects }
    }

    /// Get a user and every project they own
    pub async fn get(&self, id: &UserId) -> Result<(User, Vec<Project>), AppError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User with id {} not found", id)))?;

        let projects = self.projects.find_all_by_owner(id).await?;

        Ok((user, projects))
    }

    /// Create a user after validating it and checking for duplicates
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        new_user.validate()?;

        if let Some(id) = new_user.id {
            if self.users.find_by_id(&id).await?.is_some() {
                return Err(DomainError::AlreadyExists(format!(
                    "User with id {} already exists",
                    id
                ))
                .into());
            }
        }

        if let Some(username) = &new_user.username {
            if self.users.find_by_username(username).await?.is_some() {
                return Err(DomainError::Conflict("Username already exists".to_string()).into());
            }
        }

        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".to_string()).into());
        }

        let user = self.users.create(&new_user).await?;
        tracing::debug!(user_id = %user.id, "User created");

        Ok(user)
    }
}
