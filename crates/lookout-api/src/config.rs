// Server configuration from environment variables

use axum::http::HeaderValue;

/// Ring capacity a stream subscriber may lag before drop-oldest kicks in
const DEFAULT_STREAM_CAPACITY: usize = 256;

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to (`LOOKOUT_BIND_ADDR`)
    pub bind_addr: String,
    /// SQLite database path; `:memory:` runs without a durable file
    /// (`LOOKOUT_DATABASE_PATH`)
    pub database_path: String,
    /// Live stream ring capacity (`LOOKOUT_STREAM_CAPACITY`)
    pub stream_capacity: usize,
    /// Browser origins allowed to call the API (`CORS_ALLOWED_ORIGINS`,
    /// comma-separated; empty means same-origin only)
    pub cors_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("LOOKOUT_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let database_path =
            std::env::var("LOOKOUT_DATABASE_PATH").unwrap_or_else(|_| "lookout.db".to_string());

        let stream_capacity = std::env::var("LOOKOUT_STREAM_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&capacity: &usize| capacity > 0)
            .unwrap_or(DEFAULT_STREAM_CAPACITY);

        let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .filter(|s| !s.is_empty())
            .map(|s| s.split(',').filter_map(|s| s.trim().parse().ok()).collect())
            .unwrap_or_default();

        Self {
            bind_addr,
            database_path,
            stream_capacity,
            cors_origins,
        }
    }

    /// Dev mode runs without a durable file; events are lost on restart
    pub fn dev_mode(&self) -> bool {
        self.database_path == ":memory:"
    }
}
