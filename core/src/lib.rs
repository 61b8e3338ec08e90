//! # Todolist Core
//!
//! Domain types and the in-memory todo list for the todolist server.
//!
//! ## Components
//!
//! - **Types**: [`Todo`] and its store-assigned [`TodoId`]
//! - **Store**: the [`TodoStore`] trait, implemented by the SQLite crate and
//!   by the in-memory mock in `todolist-testing`
//! - **List**: [`TodoList`], the cached view of every row, shared by all
//!   request handlers
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todolist_core::{TodoList, TodoStore};
//!
//! async fn example(store: Arc<dyn TodoStore>) -> Result<(), todolist_core::TodoError> {
//!     let todos = TodoList::load(store).await?;
//!
//!     let todo = todos.create("Buy milk").await?;
//!     let todo = todos.toggle(todo.id).await?;
//!     assert!(todo.finished);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod list;
pub mod store;
pub mod types;

pub use error::{StoreError, TodoError};
pub use list::TodoList;
pub use store::{StoreFuture, TodoStore};
pub use types::{MAX_CONTENT_LEN, Todo, TodoId, validate_content};
