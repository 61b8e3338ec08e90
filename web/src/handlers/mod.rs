//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by concern.

pub mod health;
pub mod todos;

pub use health::{health_check, readiness_check};
pub use todos::{create_todo, index, toggle_todo};
