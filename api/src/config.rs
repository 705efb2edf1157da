use std::env;

use jsonwebtoken::Algorithm;

const DEFAULT_SECRET: &str = "default-secret-key-change-in-production";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Signing key for access tokens
    pub secret_key: String,
    /// Signing key for refresh tokens (kept separate from `secret_key`)
    pub refresh_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub refresh_token_expire_days: i64,
    pub project_title: String,
    pub project_name: String,
    pub project_description: String,
    /// Debug mode disables the `Secure` flag on auth cookies
    pub debug: bool,
    pub backend_cors_origins: Vec<String>,
    /// Rate limit `/login` and `/signup` per peer IP
    pub auth_rate_limit: bool,
    /// bcrypt cost factor for new password hashes
    pub bcrypt_cost: u32,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let algorithm = match lookup("ALGORITHM") {
            Some(raw) => parse_algorithm(&raw).unwrap_or_else(|| {
                tracing::warn!(algorithm = %raw, "Unsupported JWT algorithm, using HS256");
                Algorithm::HS256
            }),
            None => Algorithm::HS256,
        };

        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://app.db?mode=rwc".to_string()),
            secret_key: lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET.to_string()),
            refresh_key: lookup("REFRESH_KEY").unwrap_or_else(|| DEFAULT_SECRET.to_string()),
            algorithm,
            access_token_expire_minutes: parsed("ACCESS_TOKEN_EXPIRE_MINUTES").unwrap_or(15),
            refresh_token_expire_days: parsed("REFRESH_TOKEN_EXPIRE_DAYS").unwrap_or(7),
            project_title: lookup("PROJECT_TITLE").unwrap_or_else(|| "Built".to_string()),
            project_name: lookup("PROJECT_NAME")
                .unwrap_or_else(|| "Built | Cost Management API".to_string()),
            project_description: lookup("PROJECT_DESCRIPTION").unwrap_or_else(|| {
                "A cost management system for construction companies".to_string()
            }),
            debug: lookup("DEBUG").map(|v| parse_bool(&v)).unwrap_or(false),
            backend_cors_origins: lookup("BACKEND_CORS_ORIGINS")
                .map(|v| parse_cors_origins(&v))
                .unwrap_or_else(default_cors_origins),
            auth_rate_limit: lookup("AUTH_RATE_LIMIT")
                .map(|v| parse_bool(&v))
                .unwrap_or(true),
            bcrypt_cost: parsed("BCRYPT_COST").unwrap_or(bcrypt::DEFAULT_COST),
            port: parsed("PORT").unwrap_or(8000),
        }
    }

    /// Check whether the signing keys were left at their built-in default
    pub fn uses_default_keys(&self) -> bool {
        self.secret_key == DEFAULT_SECRET || self.refresh_key == DEFAULT_SECRET
    }
}

/// Read an environment variable, matching the name case-insensitively
fn lookup(name: &str) -> Option<String> {
    env::var(name).ok().or_else(|| {
        env::vars()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparsable value");
            None
        }
    }
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_algorithm(raw: &str) -> Option<Algorithm> {
    match raw.trim().to_uppercase().as_str() {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

/// Parse CORS origins given either as a JSON array or a comma-separated list
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    if let Ok(origins) = serde_json::from_str::<Vec<String>>(raw) {
        return origins;
    }

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_origins_from_json_array() {
        let origins = parse_cors_origins(r#"["http://a.test","http://b.test"]"#);
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn cors_origins_from_comma_list() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test ");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn algorithm_accepts_hmac_only() {
        assert_eq!(parse_algorithm("hs384"), Some(Algorithm::HS384));
        assert_eq!(parse_algorithm("HS512"), Some(Algorithm::HS512));
        assert_eq!(parse_algorithm("RS256"), None);
    }

    #[test]
    fn bool_parsing() {
        assert!(parse_bool("True"));
        assert!(parse_bool("1"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
