//! Todolist server.
//!
//! The binary in `main.rs` wires the pieces together: configuration from
//! the environment, the SQLite store, the in-memory [`todolist_core::TodoList`]
//! and the axum router from `todolist-web`.

pub mod config;

pub use config::{Config, ConfigError, ServerConfig};
