//! # Todolist Testing
//!
//! Testing utilities and helpers for the todolist workspace.
//!
//! This crate provides:
//! - An in-memory [`TodoStore`](todolist_core::TodoStore) with failure injection
//! - Helpers for building a loaded `TodoList` in one call
//! - proptest strategies for todo content
//!
//! ## Example
//!
//! ```ignore
//! use todolist_testing::helpers::loaded_list;
//!
//! #[tokio::test]
//! async fn test_toggle() {
//!     let (store, todos) = loaded_list(&["Buy milk"]).await;
//!
//!     let todo = todos.toggle(TodoId::new(1)).await.unwrap();
//!     assert!(todo.finished);
//!     assert!(store.rows()[0].finished);
//! }
//! ```

pub mod store_mocks;

/// Test helpers and utilities.
pub mod helpers {
    use crate::store_mocks::InMemoryTodoStore;
    use std::sync::Arc;
    use todolist_core::{TodoError, TodoList};

    /// Seed an in-memory store and load a `TodoList` from it.
    ///
    /// Returns the store handle alongside the list so tests can assert on
    /// the persisted rows.
    ///
    /// # Errors
    ///
    /// Propagates the load error; the in-memory store only fails when
    /// failure injection is enabled, which it is not here.
    pub async fn try_loaded_list(
        contents: &[&str],
    ) -> Result<(InMemoryTodoStore, Arc<TodoList>), TodoError> {
        let store = InMemoryTodoStore::with_contents(contents);
        let todos = TodoList::load(Arc::new(store.clone())).await?;
        Ok((store, Arc::new(todos)))
    }

    /// Like [`try_loaded_list`], panicking on failure.
    ///
    /// # Panics
    ///
    /// Never in practice: loading from a healthy in-memory store cannot fail.
    #[allow(clippy::expect_used)]
    pub async fn loaded_list(contents: &[&str]) -> (InMemoryTodoStore, Arc<TodoList>) {
        try_loaded_list(contents)
            .await
            .expect("in-memory store should always load")
    }

    /// Install a `tracing` subscriber that writes to the test harness.
    ///
    /// Safe to call from every test; only the first call installs it.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use todolist_core::MAX_CONTENT_LEN;

    /// Content that passes validation unchanged: non-blank, already trimmed,
    /// within the length limit.
    pub fn valid_content() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9][a-zA-Z0-9 ,.!?'-]{0,60}[a-zA-Z0-9.!?]|[a-zA-Z0-9]"
            .prop_filter("must be within length limit", |s| {
                s.chars().count() <= MAX_CONTENT_LEN
            })
    }

    /// Arbitrary strings, including blank and markup-laden ones.
    pub fn any_content() -> impl Strategy<Value = String> {
        prop_oneof![
            valid_content(),
            "[ \t\n]{0,5}",
            "<[a-z]{1,6}>[^<>]{0,20}</[a-z]{1,6}>",
            ".{0,40}",
        ]
    }
}

// Re-export commonly used items
pub use helpers::{init_test_tracing, loaded_list};
pub use store_mocks::InMemoryTodoStore;
