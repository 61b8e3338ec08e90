//! Axum web layer for the todolist server.
//!
//! Translates HTTP requests into `TodoList` operations and renders the
//! results as HTML. The page uses htmx, so create and toggle respond with a
//! single-item fragment rather than a full page.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** form fields or query parameters (400 on malformed input)
//! 3. **Call** one `TodoList` operation, which writes through to the store
//! 4. **Map** `TodoError` to a status code (400 / 404 / 500)
//! 5. **Render** the page or the item fragment
//!
//! # Example
//!
//! ```ignore
//! use todolist_web::{AppState, build_router};
//!
//! let app = build_router(AppState::new(todos));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod render;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{FormBody, TodoIdQuery};
pub use middleware::{REQUEST_ID_HEADER, RequestIdExt, with_request_tracking};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
