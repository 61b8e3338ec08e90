//! Connection settings for the todo store.

/// URL schemes served by a hosted libSQL endpoint rather than a local file.
const REMOTE_SCHEMES: [&str; 5] = ["libsql://", "https://", "http://", "wss://", "ws://"];

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database URL, e.g. `sqlite://todos.db`, `sqlite::memory:` or
    /// `libsql://todos-org.turso.io`
    pub url: String,
    /// Auth token for hosted libSQL endpoints
    pub auth_token: Option<String>,
    /// Maximum number of pooled connections (local databases only)
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Settings for `url` with no auth token and the default pool size.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
            max_connections: 5,
        }
    }

    /// Attach an auth token. Blank tokens are treated as absent.
    #[must_use]
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.auth_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    /// Set the pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// The URL with the token masked, for logs.
    #[must_use]
    pub fn redacted(&self) -> String {
        match &self.auth_token {
            Some(_) => format!("{} (auth token set)", self.url),
            None => self.url.clone(),
        }
    }

    /// Whether the URL names a hosted libSQL database.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        let url = self.url.trim_start().to_ascii_lowercase();
        REMOTE_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
    }

    /// Whether the URL names a private in-memory database.
    ///
    /// Every connection to such a URL opens a fresh, empty database.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}
