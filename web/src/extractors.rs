//! Custom Axum extractors.
//!
//! - `TodoIdQuery`: the `id` query parameter of the toggle endpoint
//! - `FormBody`: a url-encoded form whose rejections render as `AppError`
//!
//! # Examples
//!
//! ```ignore
//! use todolist_web::extractors::TodoIdQuery;
//!
//! async fn handler(TodoIdQuery(id): TodoIdQuery) -> String {
//!     format!("Toggling {id}")
//! }
//! ```

use crate::error::AppError;
use axum::{
    Form, async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::{Deserialize, de::DeserializeOwned};
use todolist_core::TodoId;

/// Todo id taken from the `id` query parameter.
///
/// Rejects with 400 Bad Request when the parameter is missing or is not an
/// integer. Range checks are left to the list, which answers 404 for ids
/// that do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoIdQuery(pub TodoId);

#[derive(Debug, Deserialize)]
struct IdParams {
    id: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for TodoIdQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<IdParams>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        let raw = params
            .id
            .ok_or_else(|| AppError::bad_request("Missing query parameter: id"))?;

        raw.trim()
            .parse::<i64>()
            .map(|id| Self(TodoId::new(id)))
            .map_err(|_| AppError::bad_request(format!("Invalid todo id: {raw}")))
    }
}

/// Url-encoded form body.
///
/// Wraps `axum::Form` so a wrong content type or an undecodable body is a
/// 400 error fragment like every other malformed input, instead of axum's
/// plain-text 415/422 rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(uri: &str) -> Result<TodoIdQuery, AppError> {
        let req = Request::builder().uri(uri).body(()).unwrap();
        let (mut parts, ()) = req.into_parts();
        TodoIdQuery::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_id() {
        let TodoIdQuery(id) = extract("/todo/toggle?id=7").await.unwrap();
        assert_eq!(id, TodoId::new(7));
    }

    #[tokio::test]
    async fn test_id_among_other_params() {
        let TodoIdQuery(id) = extract("/todo/toggle?x=1&id=12&y").await.unwrap();
        assert_eq!(id, TodoId::new(12));
    }

    #[tokio::test]
    async fn test_missing_id() {
        for uri in ["/todo/toggle", "/todo/toggle?", "/todo/toggle?other=1"] {
            let err = extract(uri).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_non_numeric_id() {
        for uri in ["/todo/toggle?id=abc", "/todo/toggle?id=", "/todo/toggle?id=1.5"] {
            let err = extract(uri).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[derive(Debug, Deserialize)]
    struct Note {
        text: String,
    }

    async fn extract_form(content_type: &str, body: &str) -> Result<FormBody<Note>, AppError> {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", content_type)
            .body(axum::body::Body::from(body.to_string()))
            .unwrap();
        FormBody::<Note>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_form_body_decodes() {
        let FormBody(note) = extract_form("application/x-www-form-urlencoded", "text=hi%21")
            .await
            .unwrap();
        assert_eq!(note.text, "hi!");
    }

    #[tokio::test]
    async fn test_form_body_rejections_are_bad_request() {
        let cases = [
            ("application/json", r#"{"text":"hi"}"#),
            ("application/x-www-form-urlencoded", "text=a&text=b"),
            ("application/x-www-form-urlencoded", "other=1"),
        ];
        for (content_type, body) in cases {
            let err = extract_form(content_type, body).await.unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{content_type} {body}");
        }
    }

    #[tokio::test]
    async fn test_negative_id_is_left_to_the_list() {
        let TodoIdQuery(id) = extract("/todo/toggle?id=-3").await.unwrap();
        assert_eq!(id, TodoId::new(-3));
    }
}
