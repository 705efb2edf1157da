//! Failure recording
//!
//! Every response with a status of 400 or above is written to the activity
//! log as `API_CALL_FAIL`. Error responses that did not come from an
//! [`AppError`] (unmatched methods, rate limiting) are rewritten into the
//! error envelope on the way out.

use std::any::Any;

use axum::{
    body::Body,
    extract::{OriginalUri, State},
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        Request,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::auth::CurrentUser;
use crate::domain::entities::{Action, NewActivityLog};
use crate::error::{AppError, ErrorResponse, FailureRecord};
use crate::AppState;

/// Failure-recording middleware
pub async fn record_failures(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let caller = request.extensions().get::<CurrentUser>().map(|c| c.0);
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().clone();

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (response, record) = match response.extensions().get::<FailureRecord>().cloned() {
        Some(record) => (response, record),
        None => into_envelope(response),
    };

    let mut entry = NewActivityLog::new(
        Action::ApiCallFail,
        format!("{}: {}", record.title, record.detail),
    )
    .maybe_user(caller)
    .code(status.as_u16());

    if status.is_server_error() {
        entry = entry.details(format!(
            "path={} method={} error={}",
            path, method, record.error_class
        ));
    }

    state.activity_service.record(entry).await;

    response
}

/// Rewrite a bare error response into the error envelope, keeping its headers
fn into_envelope(response: Response) -> (Response, FailureRecord) {
    let (parts, _body) = response.into_parts();
    let status = parts.status;
    let title = status.canonical_reason().unwrap_or("Error");

    let mut rewritten = (
        status,
        Json(ErrorResponse::new(status, title, &[title.to_string()])),
    )
        .into_response();

    for (name, value) in parts.headers.iter() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            rewritten.headers_mut().append(name.clone(), value.clone());
        }
    }

    let record = FailureRecord {
        title: title.to_string(),
        detail: title.to_string(),
        error_class: "Http",
    };

    (rewritten, record)
}

/// Fallback for unmatched routes
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No route matches {}", uri.path()))
}

/// Turn a handler panic into a 500 error envelope
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
