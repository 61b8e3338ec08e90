//! Domain types for the todo list.
//!
//! A todo is a line of text with a completion flag. Its identifier is
//! assigned by the store on insert and never reused.

use crate::error::TodoError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a todo's content, in characters.
pub const MAX_CONTENT_LEN: usize = 500;

/// Store-assigned identifier of a todo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from a raw integer.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this id could have been assigned by the store.
    ///
    /// Auto-increment ids start at 1.
    #[must_use]
    pub const fn is_assignable(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A single todo item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Text of the todo
    pub content: String,
    /// Whether the todo is done
    pub finished: bool,
}

impl Todo {
    /// Creates an unfinished todo.
    #[must_use]
    pub const fn new(id: TodoId, content: String) -> Self {
        Self {
            id,
            content,
            finished: false,
        }
    }

    /// Flips the completion flag in place.
    pub const fn toggle(&mut self) {
        self.finished = !self.finished;
    }

    /// Returns a copy with the completion flag flipped.
    #[must_use]
    pub fn toggled(&self) -> Self {
        let mut todo = self.clone();
        todo.toggle();
        todo
    }
}

/// Validates user-supplied content and returns the trimmed text to persist.
///
/// # Errors
///
/// Returns [`TodoError::Validation`] if the content is blank or longer
/// than [`MAX_CONTENT_LEN`] characters.
pub fn validate_content(content: &str) -> Result<String, TodoError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(TodoError::Validation(
            "Todo content cannot be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_CONTENT_LEN {
        return Err(TodoError::Validation(format!(
            "Todo content too long (max {MAX_CONTENT_LEN} characters)"
        )));
    }

    Ok(trimmed.to_string())
}
