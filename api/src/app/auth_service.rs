//! Auth service
//!
//! Signup and login. Both hand back an access/refresh token pair and store
//! the refresh token on the user's credential.

use std::sync::Arc;

use super::ActivityService;
use crate::auth::{hash_password, verify_password, IssuedTokens, TokenIssuer};
use crate::domain::entities::{Action, NewActivityLog, NewCredential, NewUser, User};
use crate::domain::ports::{ActivityLogRepository, CredentialRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_CHARS: usize = 8;

/// Account details submitted on signup
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Service for signup and login
pub struct AuthService<UR, CR, AL>
where
    UR: UserRepository,
    CR: CredentialRepository,
    AL: ActivityLogRepository,
{
    users: Arc<UR>,
    credentials: Arc<CR>,
    activity: Arc<ActivityService<AL>>,
    tokens: TokenIssuer,
    hash_cost: u32,
}

impl<UR, CR, AL> AuthService<UR, CR, AL>
where
    UR: UserRepository,
    CR: CredentialRepository,
    AL: ActivityLogRepository,
{
    pub fn new(
        users: Arc<UR>,
        credentials: Arc<CR>,
        activity: Arc<ActivityService<AL>>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            users,
            credentials,
            activity,
            tokens,
            hash_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost factor
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Create an account and log it in.
    ///
    /// If anything fails after the user row exists, the row is removed again.
    pub async fn signup(&self, input: SignupInput) -> Result<IssuedTokens, AppError> {
        if input.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(AppError::validation(format!(
                "password: Password must be at least {} characters",
                MIN_PASSWORD_CHARS
            )));
        }

        let new_user = NewUser {
            id: None,
            username: Some(input.username.clone()),
            name: input.name,
            email: input.email,
        };
        new_user.validate()?;

        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".to_string()).into());
        }
        if self.users.find_by_email(&new_user.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".to_string()).into());
        }

        let user = self.users.create(&new_user).await?;

        match self.finish_signup(&user, &input.password).await {
            Ok(tokens) => Ok(tokens),
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Signup failed, removing user");
                if let Err(cleanup) = self.users.delete(&user.id).await {
                    tracing::error!(
                        user_id = %user.id,
                        error = %cleanup,
                        "Failed to remove user after signup failure"
                    );
                }
                Err(e)
            }
        }
    }

    async fn finish_signup(&self, user: &User, password: &str) -> Result<IssuedTokens, AppError> {
        let password_hash = hash_password(password, self.hash_cost)?;
        self.credentials
            .create(&NewCredential {
                user_id: user.id,
                password_hash,
            })
            .await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::Signup,
                    format!("Created account with id {}", user.id),
                )
                .user(user.id),
            )
            .await;

        self.issue(user).await
    }

    /// Check a username and password and issue tokens
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedTokens, AppError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let credential = self
            .credentials
            .find_by_user(&user.id)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "No credential associated with user `{}`",
                    username
                ))
            })?;

        if !verify_password(password, &credential.password_hash) {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        if !user.is_active {
            return Err(AppError::Forbidden("Account is not active".to_string()));
        }

        let tokens = self.issue(&user).await?;

        self.activity
            .record(
                NewActivityLog::new(
                    Action::Login,
                    format!("Logged onto the account with id {}", user.id),
                )
                .user(user.id),
            )
            .await;

        Ok(tokens)
    }

    async fn issue(&self, user: &User) -> Result<IssuedTokens, AppError> {
        let tokens = self.tokens.issue(user)?;
        self.credentials
            .store_refresh_token(&user.id, &tokens.refresh_token, tokens.refresh_expires_at)
            .await?;
        Ok(tokens)
    }
}
