//! Error types for store and list operations.

use crate::types::TodoId;
use thiserror::Error;

/// Errors raised by a [`TodoStore`](crate::store::TodoStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Could not open or reach the database.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A statement failed to execute.
    #[error("Query error: {0}")]
    Query(String),

    /// A row could not be decoded into a `Todo`.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An update targeted a row that does not exist.
    #[error("No row with id {0}")]
    RowNotFound(TodoId),
}

/// Errors raised by [`TodoList`](crate::list::TodoList) operations.
#[derive(Error, Debug)]
pub enum TodoError {
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The id does not resolve to an existing todo.
    #[error("Todo with id {0} not found")]
    NotFound(TodoId),

    /// Malformed input or an id that cannot be updated.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The task running a mutation panicked or was cancelled by runtime
    /// shutdown.
    #[error("Mutation did not complete: {0}")]
    Interrupted(String),
}
