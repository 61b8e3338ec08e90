//! Router configuration.

use crate::handlers::{create_todo, health_check, index, readiness_check, toggle_todo};
use crate::middleware::with_request_tracking;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Build the complete Axum router.
///
/// | Method | Path | Handler |
/// |---|---|---|
/// | GET | `/` | [`index`] |
/// | POST | `/todo` | [`create_todo`] |
/// | GET | `/todo/toggle` | [`toggle_todo`] |
/// | GET | `/health` | [`health_check`] |
/// | GET | `/ready` | [`readiness_check`] |
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/", get(index))
        .route("/todo", post(create_todo))
        .route("/todo/toggle", get(toggle_todo))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state);

    with_request_tracking(router)
}
