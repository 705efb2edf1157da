//! Credential domain entity
//!
//! Password hash and the most recently issued refresh token for a user.

use chrono::{DateTime, Utc};

use super::user::UserId;

#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub refresh_token_expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewCredential {
    pub user_id: UserId,
    pub password_hash: String,
}
