//! Store trait for persisting todos.
//!
//! The store is the relational collaborator behind [`TodoList`](crate::list::TodoList).
//! It owns id assignment: every insert returns the id the database chose,
//! so the in-memory list never guesses ids from its own length.
//!
//! # Implementations
//!
//! - `SqliteTodoStore` (in `todolist-sqlite`): `sqlx` over SQLite
//! - `InMemoryTodoStore` (in `todolist-testing`): deterministic tests
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of `async fn` so the list
//! can hold an `Arc<dyn TodoStore>`.

use crate::error::StoreError;
use crate::types::Todo;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by store methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Persistence for todo rows.
pub trait TodoStore: Send + Sync {
    /// Load every row, ordered by id ascending.
    ///
    /// # Errors
    ///
    /// - `Query`: the select failed
    /// - `Decode`: a row could not be mapped to a `Todo`
    fn load_all(&self) -> StoreFuture<'_, Vec<Todo>>;

    /// Insert an unfinished todo and return it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// - `Query`: the insert failed
    fn insert<'a>(&'a self, content: &'a str) -> StoreFuture<'a, Todo>;

    /// Write `content` and `finished` to the row matching `todo.id`.
    ///
    /// # Errors
    ///
    /// - `RowNotFound`: no row has that id
    /// - `Query`: the update failed
    fn update<'a>(&'a self, todo: &'a Todo) -> StoreFuture<'a, ()>;

    /// Cheap connectivity probe.
    ///
    /// # Errors
    ///
    /// - `Connection`: the database is unreachable
    fn ping(&self) -> StoreFuture<'_, ()>;
}
