//! SQLite todo store for the todolist workspace.
//!
//! This crate implements the `TodoStore` trait from `todolist-core` twice:
//! [`SqliteTodoStore`] over sqlx's SQLite driver for local files, and
//! [`LibsqlTodoStore`] over the `libsql` client for hosted databases.
//! [`connect`] picks one from the URL. It provides:
//!
//! - Connection pooling with WAL journaling and a busy timeout (local)
//! - Idempotent schema creation at startup
//! - Parameterized statements only; content is never spliced into SQL
//! - Store-assigned ids via `INSERT ... RETURNING`
//!
//! # Example
//!
//! ```ignore
//! use todolist_sqlite::DatabaseConfig;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::new("libsql://todos-org.turso.io").with_auth_token(token);
//!     let store = todolist_sqlite::connect(&config).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod remote;

pub use config::DatabaseConfig;
pub use remote::LibsqlTodoStore;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use todolist_core::{StoreError, StoreFuture, Todo, TodoId, TodoStore};

pub(crate) const SCHEMA_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        content TEXT NOT NULL,
        finished INTEGER NOT NULL DEFAULT 0
    )
";

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    content: String,
    finished: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::new(row.id),
            content: row.content,
            finished: row.finished,
        }
    }
}

/// Map a driver error onto the store's error kinds.
fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Configuration(_) => StoreError::Connection(err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::Decode(err.to_string()),
        other => StoreError::Query(other.to_string()),
    }
}

/// Open the store `config` describes.
///
/// Remote URLs (`libsql://`, `https://`, ...) get a [`LibsqlTodoStore`]
/// authenticated with the configured token; anything else is opened locally
/// as a [`SqliteTodoStore`].
///
/// # Errors
///
/// Propagates the chosen store's connect error.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn TodoStore>, StoreError> {
    if config.is_remote() {
        Ok(Arc::new(LibsqlTodoStore::connect(config).await?))
    } else {
        Ok(Arc::new(SqliteTodoStore::connect(config).await?))
    }
}

/// SQLite-backed todo store.
#[derive(Clone, Debug)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    /// Open the database described by `config` and create the schema.
    ///
    /// Missing database files are created. In-memory URLs get a single
    /// connection, since each connection would otherwise see its own empty
    /// database.
    ///
    /// # Errors
    ///
    /// - `Connection`: the URL is invalid or the database cannot be opened
    /// - `Query`: the schema could not be created
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        if config.auth_token.is_some() {
            tracing::warn!(
                url = %config.redacted(),
                "DATABASE_AUTH_TOKEN only applies to remote databases; ignoring it"
            );
        }

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(store_error)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        let max_connections = if config.is_in_memory() {
            1
        } else {
            options = options.journal_mode(SqliteJournalMode::Wal);
            config.max_connections.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(store_error)?;

        let store = Self::from_pool(pool);
        store.migrate().await?;

        tracing::info!(url = %config.redacted(), max_connections, "Connected to SQLite");
        Ok(store)
    }

    /// Wrap an existing pool. The schema is not created.
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `todos` table if absent.
    ///
    /// # Errors
    ///
    /// Returns `Query` if the statement fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA_SQL)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

impl TodoStore for SqliteTodoStore {
    fn load_all(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, TodoRow>(
                "SELECT id, content, finished FROM todos ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

            Ok(rows.into_iter().map(Todo::from).collect())
        })
    }

    fn insert<'a>(&'a self, content: &'a str) -> StoreFuture<'a, Todo> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, TodoRow>(
                "INSERT INTO todos (content, finished) VALUES (?, 0)
                 RETURNING id, content, finished",
            )
            .bind(content)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;

            tracing::debug!(id = row.id, "Inserted todo row");
            Ok(row.into())
        })
    }

    fn update<'a>(&'a self, todo: &'a Todo) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let result = sqlx::query("UPDATE todos SET content = ?, finished = ? WHERE id = ?")
                .bind(&todo.content)
                .bind(todo.finished)
                .bind(todo.id.get())
                .execute(&self.pool)
                .await
                .map_err(store_error)?;

            if result.rows_affected() == 0 {
                return Err(StoreError::RowNotFound(todo.id));
            }
            Ok(())
        })
    }

    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Connection(e.to_string()))?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_connection() {
        assert!(matches!(
            store_error(sqlx::Error::PoolTimedOut),
            StoreError::Connection(_)
        ));
    }

    #[test]
    fn test_row_not_found_maps_to_query() {
        assert!(matches!(
            store_error(sqlx::Error::RowNotFound),
            StoreError::Query(_)
        ));
    }

    #[test]
    fn test_row_conversion() {
        let todo = Todo::from(TodoRow {
            id: 4,
            content: "Buy milk".to_string(),
            finished: true,
        });
        assert_eq!(todo.id, TodoId::new(4));
        assert!(todo.finished);
    }
}
