//! Request identity middleware

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::domain::entities::UserId;
use crate::AppState;

/// Caller identified by a valid bearer access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

/// Extract the token from the Authorization header
fn extract_bearer(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Optional authentication middleware
///
/// Never rejects a request. When a valid access token is presented the caller
/// is injected into request extensions as [`CurrentUser`].
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer(&request) {
        match state.tokens.decode_access(token) {
            Ok(claims) => {
                if let Some(user_id) = claims.user_id() {
                    request.extensions_mut().insert(CurrentUser(user_id));
                }
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring invalid bearer token"),
        }
    }

    next.run(request).await
}
