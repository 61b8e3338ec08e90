//! Hosted libSQL store.
//!
//! Used when `DATABASE_URL` points at a libSQL server (`libsql://`,
//! `https://`, ...). Statements go over the network through the `libsql`
//! client; the schema and SQL are the same as the local store's.

use crate::{DatabaseConfig, SCHEMA_SQL};
use libsql::{Builder, Connection, params};
use std::fmt;
use todolist_core::{StoreError, StoreFuture, Todo, TodoId, TodoStore};

/// libSQL-backed todo store for remote databases.
///
/// Holds a single connection; `libsql::Connection` is safe to share
/// across concurrent calls.
#[derive(Clone)]
pub struct LibsqlTodoStore {
    conn: Connection,
}

impl fmt::Debug for LibsqlTodoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibsqlTodoStore").finish_non_exhaustive()
    }
}

fn query_error(err: libsql::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

fn decode_error(err: libsql::Error) -> StoreError {
    StoreError::Decode(err.to_string())
}

fn row_to_todo(row: &libsql::Row) -> Result<Todo, StoreError> {
    let id: i64 = row.get(0).map_err(decode_error)?;
    let content: String = row.get(1).map_err(decode_error)?;
    let finished: i64 = row.get(2).map_err(decode_error)?;

    Ok(Todo {
        id: TodoId::new(id),
        content,
        finished: finished != 0,
    })
}

impl LibsqlTodoStore {
    /// Open the remote database at `config.url`, authenticating with
    /// `config.auth_token`, and create the schema.
    ///
    /// # Errors
    ///
    /// Returns `Connection` if the client cannot be built or the server
    /// does not answer the schema statement.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if config.auth_token.is_none() {
            tracing::warn!(url = %config.url, "No DATABASE_AUTH_TOKEN set for remote database");
        }

        let db = Builder::new_remote(
            config.url.clone(),
            config.auth_token.clone().unwrap_or_default(),
        )
        .build()
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { conn };
        store
            .migrate()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!(url = %config.redacted(), "Connected to remote libSQL database");
        Ok(store)
    }

    /// Create the `todos` table if absent.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute(SCHEMA_SQL, ())
            .await
            .map_err(query_error)?;
        Ok(())
    }
}

impl TodoStore for LibsqlTodoStore {
    fn load_all(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let mut rows = self
                .conn
                .query("SELECT id, content, finished FROM todos ORDER BY id", ())
                .await
                .map_err(query_error)?;

            let mut todos = Vec::new();
            while let Some(row) = rows.next().await.map_err(query_error)? {
                todos.push(row_to_todo(&row)?);
            }
            Ok(todos)
        })
    }

    fn insert<'a>(&'a self, content: &'a str) -> StoreFuture<'a, Todo> {
        Box::pin(async move {
            let mut rows = self
                .conn
                .query(
                    "INSERT INTO todos (content, finished) VALUES (?1, 0)
                     RETURNING id, content, finished",
                    params![content],
                )
                .await
                .map_err(query_error)?;

            let row = rows
                .next()
                .await
                .map_err(query_error)?
                .ok_or_else(|| StoreError::Query("INSERT returned no row".to_string()))?;
            let todo = row_to_todo(&row)?;

            tracing::debug!(id = %todo.id, "Inserted todo row");
            Ok(todo)
        })
    }

    fn update<'a>(&'a self, todo: &'a Todo) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let affected = self
                .conn
                .execute(
                    "UPDATE todos SET content = ?1, finished = ?2 WHERE id = ?3",
                    params![todo.content.as_str(), i64::from(todo.finished), todo.id.get()],
                )
                .await
                .map_err(query_error)?;

            if affected == 0 {
                return Err(StoreError::RowNotFound(todo.id));
            }
            Ok(())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.conn
                .query("SELECT 1", ())
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            Ok(())
        })
    }
}
