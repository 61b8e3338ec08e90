//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

/// Liveness probe.
///
/// Returns 200 OK whenever the process is serving. Does NOT check the
/// database.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Readiness probe.
///
/// Returns 200 OK when the store answers a trivial query, 503 otherwise.
///
/// # Endpoint
///
/// ```text
/// GET /ready
/// ```
///
/// # Errors
///
/// Returns a 503 `AppError` when the store is unreachable.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, &'static str), AppError> {
    state.todos.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "Readiness check failed");
        AppError::unavailable("Database unavailable")
    })?;

    Ok((StatusCode::OK, "ready"))
}
