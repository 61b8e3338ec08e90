//! Todo endpoints.
//!
//! - `GET /` - full page listing every todo
//! - `POST /todo` - create a todo from the `content` form field
//! - `GET /todo/toggle?id=N` - flip a todo's completion flag
//!
//! Create and toggle answer with the single-item fragment so the page can
//! swap it in without a reload.

use crate::extractors::{FormBody, TodoIdQuery};
use crate::render;
use crate::state::AppState;
use crate::WebResult;
use axum::{extract::State, response::Html};
use serde::Deserialize;

/// Form body of `POST /todo`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoForm {
    /// Todo text; a missing field is treated as empty
    #[serde(default)]
    pub content: String,
}

/// Render the full page.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/
/// ```
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let todos = state.todos.all().await;
    Html(render::page(&todos))
}

/// Create a todo and render its fragment.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:3000/todo -d 'content=buy milk'
/// ```
///
/// # Errors
///
/// - 400 if the body is not a url-encoded form, or the content is blank or
///   too long
/// - 500 if the store rejects the insert
pub async fn create_todo(
    State(state): State<AppState>,
    FormBody(form): FormBody<CreateTodoForm>,
) -> WebResult<Html<String>> {
    let todo = state.todos.create(&form.content).await?;

    tracing::info!(id = %todo.id, "Todo created");
    Ok(Html(render::todo_item(&todo)))
}

/// Flip a todo's completion flag and render its fragment.
///
/// # Example
///
/// ```bash
/// curl 'http://localhost:3000/todo/toggle?id=1'
/// ```
///
/// # Errors
///
/// - 400 if `id` is missing or not an integer
/// - 404 if no todo has this id
/// - 500 if the store rejects the update
pub async fn toggle_todo(
    State(state): State<AppState>,
    TodoIdQuery(id): TodoIdQuery,
) -> WebResult<Html<String>> {
    let todo = state.todos.toggle(id).await?;

    tracing::info!(id = %todo.id, finished = todo.finished, "Todo toggled");
    Ok(Html(render::todo_item(&todo)))
}
