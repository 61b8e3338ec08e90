//! The in-memory todo list.
//!
//! `TodoList` mirrors the store's rows in a map keyed by [`TodoId`] and is
//! the only component that talks to the store. It is shared across request
//! handlers behind an `Arc`.
//!
//! # Consistency
//!
//! Every mutation takes the write lock, performs the store call, and only
//! then touches the map. A failed store call leaves the map unchanged, and
//! two concurrent mutations can never interleave between the store write and
//! the mirror update.
//!
//! Mutations run on their own task. Dropping the future returned by
//! [`TodoList::create`], [`TodoList::update`] or [`TodoList::toggle`] (for
//! example when an HTTP client disconnects) does not stop the mutation: the
//! store write and the mirror update still both happen.

use crate::error::TodoError;
use crate::store::TodoStore;
use crate::types::{Todo, TodoId, validate_content};
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::Instrument;

/// Cached view of all todos, kept in sync with the store on every mutation.
pub struct TodoList {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn TodoStore>,
    todos: RwLock<BTreeMap<TodoId, Todo>>,
}

impl Inner {
    async fn create(self: Arc<Self>, content: String) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        let todo = self.store.insert(&content).await?;

        if todos.contains_key(&todo.id) {
            tracing::warn!(id = %todo.id, "Store reused an id already in the list");
        }
        todos.insert(todo.id, todo.clone());

        tracing::debug!(id = %todo.id, "Todo created");
        Ok(todo)
    }

    async fn update(self: Arc<Self>, todo: Todo) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        if !todos.contains_key(&todo.id) {
            return Err(TodoError::Validation(format!(
                "Todo id {} does not name an existing todo",
                todo.id
            )));
        }

        self.store.update(&todo).await?;
        todos.insert(todo.id, todo.clone());

        tracing::debug!(finished = todo.finished, "Todo updated");
        Ok(todo)
    }

    async fn toggle(self: Arc<Self>, id: TodoId) -> Result<Todo, TodoError> {
        let mut todos = self.todos.write().await;
        let toggled = todos
            .get(&id)
            .map(Todo::toggled)
            .ok_or(TodoError::NotFound(id))?;

        self.store.update(&toggled).await?;
        todos.insert(id, toggled.clone());

        tracing::debug!(finished = toggled.finished, "Todo toggled");
        Ok(toggled)
    }
}

impl TodoList {
    /// Populate the list from every row in the store.
    ///
    /// Called once at startup.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the rows cannot be read or decoded.
    #[tracing::instrument(skip(store))]
    pub async fn load(store: Arc<dyn TodoStore>) -> Result<Self, TodoError> {
        let rows = store.load_all().await?;
        let todos: BTreeMap<TodoId, Todo> = rows.into_iter().map(|todo| (todo.id, todo)).collect();

        tracing::info!(count = todos.len(), "Todo list loaded");

        Ok(Self {
            inner: Arc::new(Inner {
                store,
                todos: RwLock::new(todos),
            }),
        })
    }

    /// Look up a todo by id.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] if no todo has this id. Ids below 1
    /// are never assigned and always miss.
    pub async fn find(&self, id: TodoId) -> Result<Todo, TodoError> {
        if !id.is_assignable() {
            return Err(TodoError::NotFound(id));
        }

        self.inner
            .todos
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TodoError::NotFound(id))
    }

    /// Insert a new unfinished todo and mirror it.
    ///
    /// The content is trimmed before it is stored.
    ///
    /// # Errors
    ///
    /// - [`TodoError::Validation`] if the content is blank or too long
    /// - [`TodoError::Store`] if the insert fails
    /// - [`TodoError::Interrupted`] if the mutation task did not finish
    #[tracing::instrument(skip(self, content))]
    pub async fn create(&self, content: &str) -> Result<Todo, TodoError> {
        let content = validate_content(content)?;
        self.detached(|inner| inner.create(content)).await
    }

    /// Persist a todo's `content` and `finished` and replace the cached entry.
    ///
    /// # Errors
    ///
    /// - [`TodoError::Validation`] if `todo.id` does not name an existing
    ///   todo, or the content is invalid
    /// - [`TodoError::Store`] if the update fails
    /// - [`TodoError::Interrupted`] if the mutation task did not finish
    #[tracing::instrument(skip(self, todo), fields(id = %todo.id))]
    pub async fn update(&self, todo: Todo) -> Result<Todo, TodoError> {
        let content = validate_content(&todo.content)?;
        let todo = Todo { content, ..todo };
        self.detached(|inner| inner.update(todo)).await
    }

    /// Flip a todo's completion flag and persist it.
    ///
    /// Lookup, flip and write happen under one lock acquisition, so two
    /// concurrent toggles of the same id always cancel out.
    ///
    /// # Errors
    ///
    /// - [`TodoError::NotFound`] if no todo has this id
    /// - [`TodoError::Store`] if the update fails
    /// - [`TodoError::Interrupted`] if the mutation task did not finish
    #[tracing::instrument(skip(self))]
    pub async fn toggle(&self, id: TodoId) -> Result<Todo, TodoError> {
        self.detached(|inner| inner.toggle(id)).await
    }

    /// Snapshot of all todos in id order.
    pub async fn all(&self) -> Vec<Todo> {
        self.inner.todos.read().await.values().cloned().collect()
    }

    /// Number of todos.
    pub async fn len(&self) -> usize {
        self.inner.todos.read().await.len()
    }

    /// Whether the list has no todos.
    pub async fn is_empty(&self) -> bool {
        self.inner.todos.read().await.is_empty()
    }

    /// Number of finished todos.
    pub async fn finished_count(&self) -> usize {
        self.inner
            .todos
            .read()
            .await
            .values()
            .filter(|todo| todo.finished)
            .count()
    }

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the probe fails.
    pub async fn ping(&self) -> Result<(), TodoError> {
        self.inner.store.ping().await?;
        Ok(())
    }

    /// Run a mutation on its own task and wait for it.
    async fn detached<T, F, Fut>(&self, op: F) -> Result<T, TodoError>
    where
        F: FnOnce(Arc<Inner>) -> Fut,
        Fut: Future<Output = Result<T, TodoError>> + Send + 'static,
        T: Send + 'static,
    {
        let task = op(Arc::clone(&self.inner)).in_current_span();
        tokio::spawn(task).await.map_err(|e| {
            tracing::error!(error = %e, "Mutation task failed");
            TodoError::Interrupted(e.to_string())
        })?
    }
}

impl std::fmt::Debug for TodoList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoList").finish_non_exhaustive()
    }
}
