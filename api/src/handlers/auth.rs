//! Signup and login handlers

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    Json,
};
use serde::{Deserialize, Serialize};

use super::extract::{ApiJson, ApiQuery};
use crate::app::SignupInput;
use crate::auth::IssuedTokens;
use crate::error::AppError;
use crate::AppState;

/// Name of the cookie carrying the refresh token
pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CookieQuery {
    #[serde(default)]
    pub use_cookie: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CookieQuery>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginToken>), AppError> {
    let tokens = state
        .auth_service
        .login(&req.username, &req.password)
        .await?;

    respond(&state, tokens, query.use_cookie)
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CookieQuery>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(HeaderMap, Json<LoginToken>), AppError> {
    let tokens = state
        .auth_service
        .signup(SignupInput {
            username: req.username,
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    respond(&state, tokens, query.use_cookie)
}

fn respond(
    state: &AppState,
    tokens: IssuedTokens,
    use_cookie: bool,
) -> Result<(HeaderMap, Json<LoginToken>), AppError> {
    let mut headers = HeaderMap::new();
    if use_cookie {
        let max_age = state.tokens.refresh_ttl().num_seconds();
        let cookie = refresh_cookie(&tokens.refresh_token, max_age, !state.config.debug);
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid cookie header: {}", e)))?;
        headers.insert(SET_COOKIE, value);
    }

    Ok((
        headers,
        Json(LoginToken {
            access_token: tokens.access_token,
            token_type: "bearer",
        }),
    ))
}

/// Build the `Set-Cookie` value for a refresh token
fn refresh_cookie(token: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Max-Age={}; Path=/",
        REFRESH_COOKIE, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
