//! SQL adapter for CredentialRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};

use crate::domain::entities::{Credential, NewCredential, UserId};
use crate::domain::ports::CredentialRepository;
use crate::entity::credentials;
use crate::error::DomainError;

use super::db_error;

/// SeaORM implementation of CredentialRepository
pub struct SqlCredentialRepository {
    db: DatabaseConnection,
}

impl SqlCredentialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialRepository for SqlCredentialRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Credential>, DomainError> {
        let result = credentials::Entity::find_by_id(user_id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.map(|m| m.into()))
    }

    async fn create(&self, credential: &NewCredential) -> Result<Credential, DomainError> {
        let model = credentials::ActiveModel {
            user_id: Set(credential.user_id.0),
            password_hash: Set(credential.password_hash.clone()),
            refresh_token: Set(None),
            refresh_token_expires: Set(None),
        };

        let result = model.insert(&self.db).await.map_err(db_error)?;

        Ok(result.into())
    }

    async fn store_refresh_token(
        &self,
        user_id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let credential = credentials::Entity::find_by_id(user_id.0)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| {
                DomainError::NotFound(format!("No credential for user {}", user_id))
            })?;

        let mut active_model = credential.into_active_model();
        active_model.refresh_token = Set(Some(token.to_string()));
        active_model.refresh_token_expires = Set(Some(expires_at.fixed_offset()));

        active_model.update(&self.db).await.map_err(db_error)?;

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<credentials::Model> for Credential {
    fn from(model: credentials::Model) -> Self {
        Credential {
            user_id: UserId(model.user_id),
            password_hash: model.password_hash,
            refresh_token: model.refresh_token,
            refresh_token_expires: model.refresh_token_expires.map(|dt| dt.with_timezone(&Utc)),
        }
    }
}
