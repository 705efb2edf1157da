//! JWT access and refresh tokens

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::entities::{User, UserId};
use crate::error::DomainError;

/// Claims carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Username, or the user id for users without one
    pub sub: String,
    pub user_id: String,
    pub email: String,
    pub exp: i64,
}

impl Claims {
    fn for_user(user: &User, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: user.subject(),
            user_id: user.id.to_string(),
            email: user.email.clone(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        Uuid::parse_str(&self.user_id).ok().map(UserId)
    }
}

/// Tokens handed out on login and signup
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Signs and verifies tokens with the configured keys
#[derive(Clone)]
pub struct TokenIssuer {
    secret_key: String,
    refresh_key: String,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(
        secret_key: impl Into<String>,
        refresh_key: impl Into<String>,
        algorithm: Algorithm,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            secret_key: secret_key.into(),
            refresh_key: refresh_key.into(),
            algorithm,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.secret_key.clone(),
            config.refresh_key.clone(),
            config.algorithm,
            Duration::minutes(config.access_token_expire_minutes),
            Duration::days(config.refresh_token_expire_days),
        )
    }

    /// Lifetime of refresh tokens, used for the cookie max-age
    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Issue an access/refresh pair for a user
    pub fn issue(&self, user: &User) -> Result<IssuedTokens, DomainError> {
        let now = Utc::now();
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = self.sign(
            &Claims::for_user(user, now + self.access_ttl),
            &self.secret_key,
        )?;
        let refresh_token = self.sign(
            &Claims::for_user(user, refresh_expires_at),
            &self.refresh_key,
        )?;

        Ok(IssuedTokens {
            access_token,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Verify an access token's signature and expiry
    pub fn decode_access(&self, token: &str) -> Result<Claims, DomainError> {
        self.verify(token, &self.secret_key)
    }

    fn sign(&self, claims: &Claims, key: &str) -> Result<String, DomainError> {
        encode(
            &Header::new(self.algorithm),
            claims,
            &EncodingKey::from_secret(key.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("Failed to sign token: {}", e)))
    }

    fn verify(&self, token: &str, key: &str) -> Result<Claims, DomainError> {
        let validation = Validation::new(self.algorithm);
        decode::<Claims>(token, &DecodingKey::from_secret(key.as_bytes()), &validation)
            .map(|data| data.claims)
            .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
