//! User domain entity
//!
//! A person who owns construction projects.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::error::DomainError;

entity_id!(
    /// Unique identifier for a user
    UserId
);

/// A registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Subject used in issued tokens
    pub fn subject(&self) -> String {
        self.username
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// Data needed to create a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Client-chosen id; generated when absent
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(DomainError::Validation(
                "name and email are required".to_string(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(DomainError::Validation(
                "email: value is not a valid email address".to_string(),
            ));
        }
        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err(DomainError::Validation(
                    "username must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Check that a string looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
                .expect("email pattern is valid")
        })
        .is_match(email)
}
