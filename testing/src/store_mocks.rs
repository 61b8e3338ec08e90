//! In-memory store for fast, deterministic testing.
//!
//! [`InMemoryTodoStore`] behaves like the SQLite store: ids come from an
//! auto-increment counter that never goes backwards, and updates to unknown
//! ids fail with `RowNotFound`. Failure injection lets tests exercise the
//! error paths of the list and the HTTP layer.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only happens after a test already panicked

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use todolist_core::{StoreError, StoreFuture, Todo, TodoId, TodoStore};

#[derive(Debug, Default)]
struct Rows {
    rows: BTreeMap<TodoId, Todo>,
    next_id: i64,
}

/// `BTreeMap`-backed [`TodoStore`].
///
/// Clones share the same rows, so a test can keep a handle for assertions
/// after passing the store to a `TodoList`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use todolist_core::TodoList;
/// use todolist_testing::InMemoryTodoStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryTodoStore::new();
/// let todos = TodoList::load(Arc::new(store.clone())).await?;
///
/// todos.create("Buy milk").await?;
/// assert_eq!(store.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoStore {
    inner: Arc<RwLock<Rows>>,
    failing: Arc<AtomicBool>,
    writes: Arc<AtomicUsize>,
    commit_delay_ms: Arc<AtomicU64>,
}

impl InMemoryTodoStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one unfinished row per entry, ids from 1.
    #[must_use]
    pub fn with_contents(contents: &[&str]) -> Self {
        let store = Self::new();
        for content in contents {
            store.seed(content, false);
        }
        store
    }

    /// Insert a row directly, bypassing failure injection.
    pub fn seed(&self, content: &str, finished: bool) -> Todo {
        let mut inner = self.inner.write().unwrap();
        inner.next_id += 1;
        let todo = Todo {
            id: TodoId::new(inner.next_id),
            content: content.to_string(),
            finished,
        };
        inner.rows.insert(todo.id, todo.clone());
        todo
    }

    /// Delete a row directly, as an out-of-band client would.
    pub fn remove(&self, id: TodoId) -> Option<Todo> {
        self.inner.write().unwrap().rows.remove(&id)
    }

    /// Make every subsequent call fail with `StoreError::Query` until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Sleep for `delay` after each insert or update has been applied,
    /// before the call returns.
    ///
    /// Models a database whose reply arrives well after the commit, so tests
    /// can drop a caller between the two.
    pub fn set_commit_delay(&self, delay: Duration) {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self.commit_delay_ms.store(millis, Ordering::SeqCst);
    }

    /// Snapshot of all rows in id order.
    #[must_use]
    pub fn rows(&self) -> Vec<Todo> {
        self.inner.read().unwrap().rows.values().cloned().collect()
    }

    /// Get a single row.
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<Todo> {
        self.inner.read().unwrap().rows.get(&id).cloned()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().rows.len()
    }

    /// Whether the store has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().rows.is_empty()
    }

    /// Number of successful inserts and updates since creation.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    async fn after_commit(&self) {
        let millis = self.commit_delay_ms.load(Ordering::SeqCst);
        if millis > 0 {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Query("injected failure".to_string()));
        }
        Ok(())
    }
}

impl TodoStore for InMemoryTodoStore {
    fn load_all(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            self.check_failing()?;
            Ok(self.rows())
        })
    }

    fn insert<'a>(&'a self, content: &'a str) -> StoreFuture<'a, Todo> {
        Box::pin(async move {
            self.check_failing()?;
            // Let concurrent callers interleave the way a real database round-trip would.
            tokio::task::yield_now().await;

            let todo = self.seed(content, false);
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.after_commit().await;
            Ok(todo)
        })
    }

    fn update<'a>(&'a self, todo: &'a Todo) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            self.check_failing()?;
            tokio::task::yield_now().await;

            {
                let mut inner = self.inner.write().unwrap();
                let Some(row) = inner.rows.get_mut(&todo.id) else {
                    return Err(StoreError::RowNotFound(todo.id));
                };
                row.content.clone_from(&todo.content);
                row.finished = todo.finished;
                drop(inner);
            }

            self.writes.fetch_add(1, Ordering::SeqCst);
            self.after_commit().await;
            Ok(())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(StoreError::Connection("injected failure".to_string()));
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = InMemoryTodoStore::with_contents(&["a", "b"]);
        store.remove(TodoId::new(2));

        let todo = store.insert("c").await.unwrap();
        assert_eq!(todo.id, TodoId::new(3));
    }

    #[tokio::test]
    async fn test_update_unknown_row() {
        let store = InMemoryTodoStore::new();
        let todo = Todo::new(TodoId::new(5), "ghost".to_string());

        let result = store.update(&todo).await;
        assert!(matches!(result, Err(StoreError::RowNotFound(id)) if id == TodoId::new(5)));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryTodoStore::new();
        store.set_failing(true);

        assert!(store.insert("x").await.is_err());
        assert!(store.ping().await.is_err());
        assert!(store.is_empty());

        store.set_failing(false);
        assert!(store.insert("x").await.is_ok());
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_commit_lands_before_delayed_reply() {
        let store = InMemoryTodoStore::new();
        store.set_commit_delay(Duration::from_millis(50));

        let result = tokio::time::timeout(Duration::from_millis(5), store.insert("x")).await;

        assert!(result.is_err());
        assert_eq!(store.len(), 1);
    }
}
