//! Integration tests for `SqliteTodoStore`.
//!
//! Most tests run against a private in-memory database; the persistence
//! test uses a file in a temporary directory.

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code uses expect for clear failure messages

use std::sync::Arc;
use todolist_core::{StoreError, Todo, TodoError, TodoId, TodoList, TodoStore};
use todolist_sqlite::{DatabaseConfig, LibsqlTodoStore, SqliteTodoStore};

async fn memory_store() -> SqliteTodoStore {
    SqliteTodoStore::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("Failed to open in-memory database")
}

async fn row_count(store: &SqliteTodoStore) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM todos")
        .fetch_one(store.pool())
        .await
        .expect("Failed to count rows")
}

#[tokio::test]
async fn test_empty_store_loads_nothing() {
    let store = memory_store().await;
    let rows = store.load_all().await.expect("load_all");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_insert_assigns_sequential_ids() {
    let store = memory_store().await;

    let first = store.insert("buy milk").await.expect("insert");
    let second = store.insert("walk dog").await.expect("insert");

    assert_eq!(first.id, TodoId::new(1));
    assert_eq!(second.id, TodoId::new(2));
    assert_eq!(first.content, "buy milk");
    assert!(!first.finished);
    assert_eq!(row_count(&store).await, 2);
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let store = memory_store().await;
    store.insert("a").await.expect("insert");
    let b = store.insert("b").await.expect("insert");

    sqlx::query("DELETE FROM todos WHERE id = ?")
        .bind(b.id.get())
        .execute(store.pool())
        .await
        .expect("delete");

    let c = store.insert("c").await.expect("insert");
    assert_eq!(c.id, TodoId::new(3));
}

#[tokio::test]
async fn test_update_round_trips() {
    let store = memory_store().await;
    let todo = store.insert("buy milk").await.expect("insert");

    let updated = Todo {
        content: "buy oat milk".to_string(),
        finished: true,
        ..todo
    };
    store.update(&updated).await.expect("update");

    let rows = store.load_all().await.expect("load_all");
    assert_eq!(rows, vec![updated]);
}

#[tokio::test]
async fn test_update_missing_row() {
    let store = memory_store().await;
    let ghost = Todo::new(TodoId::new(42), "ghost".to_string());

    let result = store.update(&ghost).await;
    assert!(matches!(result, Err(StoreError::RowNotFound(id)) if id == TodoId::new(42)));
}

#[tokio::test]
async fn test_content_is_bound_not_interpolated() {
    let store = memory_store().await;
    let hostile = r#"x"); DROP TABLE todos; --"#;

    let todo = store.insert(hostile).await.expect("insert");
    let rows = store.load_all().await.expect("load_all");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].content, hostile);
    assert_eq!(todo.content, hostile);
}

#[tokio::test]
async fn test_finished_stored_as_integer_flag() {
    let store = memory_store().await;
    let todo = store.insert("flag").await.expect("insert");
    store.update(&todo.toggled()).await.expect("update");

    let raw: i64 = sqlx::query_scalar("SELECT finished FROM todos WHERE id = ?")
        .bind(todo.id.get())
        .fetch_one(store.pool())
        .await
        .expect("select");
    assert_eq!(raw, 1);
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let store = memory_store().await;
    store.insert("kept").await.expect("insert");

    store.migrate().await.expect("second migrate");
    assert_eq!(row_count(&store).await, 1);
}

#[tokio::test]
async fn test_ping() {
    let store = memory_store().await;
    store.ping().await.expect("ping");

    store.pool().close().await;
    assert!(matches!(store.ping().await, Err(StoreError::Connection(_))));
}

#[tokio::test]
async fn test_list_over_sqlite_scenario() {
    let store = memory_store().await;
    let todos = TodoList::load(Arc::new(store.clone())).await.expect("load");
    assert!(todos.is_empty().await);

    let created = todos.create("buy milk").await.expect("create");
    assert_eq!(row_count(&store).await, 1);

    let toggled = todos.toggle(created.id).await.expect("toggle");
    assert!(toggled.finished);
    let toggled = todos.toggle(created.id).await.expect("toggle");
    assert!(!toggled.finished);

    let missing = todos.toggle(TodoId::new(99)).await;
    assert!(matches!(missing, Err(TodoError::NotFound(_))));
    assert_eq!(store.load_all().await.expect("load_all"), todos.all().await);
}

#[tokio::test]
async fn test_rows_persist_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite://{}", dir.path().join("todos.db").display());
    let config = DatabaseConfig::new(url);

    {
        let store = SqliteTodoStore::connect(&config).await.expect("connect");
        let todo = store.insert("survives restart").await.expect("insert");
        store.update(&todo.toggled()).await.expect("update");
        store.pool().close().await;
    }

    let store = SqliteTodoStore::connect(&config).await.expect("reconnect");
    let todos = TodoList::load(Arc::new(store)).await.expect("load");

    let loaded = todos.find(TodoId::new(1)).await.expect("find");
    assert_eq!(loaded.content, "survives restart");
    assert!(loaded.finished);
}

#[tokio::test]
async fn test_connect_opens_local_url_with_sqlx() {
    let config = DatabaseConfig::new("sqlite::memory:").with_auth_token("unused");
    let store = todolist_sqlite::connect(&config).await.expect("connect");

    let todo = store.insert("buy milk").await.expect("insert");
    assert_eq!(todo.id, TodoId::new(1));
    assert_eq!(store.load_all().await.expect("load_all"), vec![todo]);
}

#[tokio::test]
async fn test_connect_sends_remote_url_to_libsql() {
    // Nothing listens on port 1, so the schema statement cannot be delivered.
    let config = DatabaseConfig::new("http://127.0.0.1:1").with_auth_token("token");
    assert!(config.is_remote());

    let result = todolist_sqlite::connect(&config).await;
    assert!(matches!(result, Err(StoreError::Connection(_))));

    let direct = LibsqlTodoStore::connect(&config).await;
    assert!(matches!(direct, Err(StoreError::Connection(_))));
}
