//! Request extractors
//!
//! Wrappers around axum's extractors that turn rejections into the API's
//! validation error envelope (422) instead of axum's plain-text bodies.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::{self, Deserialize, DeserializeOwned, Deserializer};

use crate::error::AppError;

/// JSON body
pub struct ApiJson<T>(pub T);

/// Path parameters
pub struct ApiPath<T>(pub T);

/// Query string
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

/// Deserialize an optional field that may be omitted but never `null`.
///
/// Use with `#[serde(default, deserialize_with = "non_null")]` on partial
/// update bodies, where `null` would otherwise read the same as "absent".
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom("field may be omitted but not null")),
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    AppError::validation(format!("body: {}", rejection.body_text()))
}

fn path_rejection(rejection: PathRejection) -> AppError {
    AppError::validation(format!("path: {}", rejection.body_text()))
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    AppError::validation(format!("query: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        name: String,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "non_null")]
        name: Option<String>,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("PATCH")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn omitted_field_is_none() {
        let ApiJson(patch) = ApiJson::<Patch>::from_request(json_request("{}"), &())
            .await
            .unwrap();
        assert!(patch.name.is_none());
    }

    #[tokio::test]
    async fn null_field_is_rejected() {
        let result = ApiJson::<Patch>::from_request(json_request("{\"name\": null}"), &()).await;
        match result {
            Err(AppError::Validation(messages)) => {
                assert!(messages[0].starts_with("body:"));
                assert!(messages[0].contains("not null"));
            }
            _ => panic!("expected a validation error"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": 5}"))
            .unwrap();

        let result = ApiJson::<Payload>::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn valid_json_is_extracted() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": \"slab\"}"))
            .unwrap();

        let ApiJson(body) = ApiJson::<Payload>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(body.name, "slab");
    }
}
