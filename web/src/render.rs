//! HTML rendering for the todo page.
//!
//! The page is driven by htmx: the create form posts to `/todo` and appends
//! the returned fragment to the list, and each item's checkbox fetches
//! `/todo/toggle?id=N` and swaps itself with the response. Both endpoints
//! return the fragment produced by [`todo_item`], so the full page and the
//! incremental updates always share one item template.

use todolist_core::{MAX_CONTENT_LEN, Todo};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the fragment for a single todo.
#[must_use]
pub fn todo_item(todo: &Todo) -> String {
    let id = todo.id;
    let (state, checked) = if todo.finished {
        ("finished", " checked")
    } else {
        ("pending", "")
    };

    format!(
        r##"<li id="todo-{id}" class="todo {state}" data-finished="{finished}">
  <label>
    <input type="checkbox"{checked} hx-get="/todo/toggle?id={id}" hx-target="closest li" hx-swap="outerHTML" hx-target-error="#errors" hx-on::after-request="if (!event.detail.successful) this.checked = !this.checked">
    <span class="content">{content}</span>
  </label>
</li>
"##,
        finished = todo.finished,
        content = escape_html(&todo.content),
    )
}

/// Render the full page listing `todos` in the given order.
#[must_use]
pub fn page(todos: &[Todo]) -> String {
    let finished = todos.iter().filter(|todo| todo.finished).count();
    let items: String = todos.iter().map(todo_item).collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Todos</title>
  <script src="{HTMX_SRC}"></script>
  <script src="{HTMX_SRC}/dist/ext/response-targets.js"></script>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 32rem; margin: 3rem auto; }}
    ul#todos {{ list-style: none; padding: 0; }}
    .todo.finished .content {{ text-decoration: line-through; color: #888; }}
    .error {{ color: #b00020; }}
  </style>
</head>
<body hx-ext="response-targets">
  <h1>Todos</h1>
  <form hx-post="/todo" hx-target="#todos" hx-swap="beforeend" hx-target-error="#errors" hx-on::after-request="if (event.detail.successful) this.reset()">
    <input type="text" name="content" placeholder="What needs doing?" maxlength="{MAX_CONTENT_LEN}" required autofocus>
    <button type="submit">Add</button>
  </form>
  <div id="errors"></div>
  <ul id="todos">
{items}  </ul>
  <footer><span id="summary">{finished} of {total} done</span></footer>
</body>
</html>
"##,
        total = todos.len(),
    )
}
