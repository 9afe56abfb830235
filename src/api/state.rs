//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::dashboard::Renderer;
use crate::session::{SessionConfig, SessionStore};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Render cycle for the dashboard page
    pub renderer: Arc<Renderer>,
    /// Per-session prompt state
    pub sessions: Arc<SessionStore>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with a default session store
    pub fn new(renderer: Renderer, config: ApiConfig) -> Self {
        Self::with_sessions(renderer, config, SessionConfig::default())
    }

    /// Create AppState with a custom session store configuration
    pub fn with_sessions(
        renderer: Renderer,
        config: ApiConfig,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            renderer: Arc::new(renderer),
            sessions: Arc::new(SessionStore::new(session_config)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get live session count
    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origins allowed to call the API cross-origin
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
