//! Application state for Axum handlers.

use axum::extract::FromRef;
use std::sync::Arc;
use todolist_core::TodoList;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via `Arc`) for each request. The list is the single
/// owner of the store handle; handlers never see the store directly.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The shared todo list
    pub todos: Arc<TodoList>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(todos: Arc<TodoList>) -> Self {
        Self { todos }
    }
}

impl FromRef<AppState> for Arc<TodoList> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.todos)
    }
}
