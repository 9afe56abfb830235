//! # Sysdash
//!
//! System Dashboard - a single-page analytics dashboard served over HTTP:
//! a statistics table, three charts over mock telemetry, and an editable
//! system prompt kept in per-session state.
//!
//! ## Modules
//!
//! - [`dashboard`]: Page model and the render cycle
//! - [`session`]: Per-session state store
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sysdash::{serve, AppState, Config, Renderer, SystemClock};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let renderer = Renderer::new(Arc::new(SystemClock), config.mock_source());
//!     let api_config = config.api_config();
//!
//!     let state = AppState::with_sessions(renderer, api_config.clone(), config.session_config());
//!     serve(state, &api_config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod session;

// Re-export top-level types for convenience
pub use dashboard::{
    Clock, FixedClock, Interaction, MockSource, PageView, PromptStatus, Rendered, Renderer,
    SessionState, SystemClock, TimeSeries, Version, WidgetState,
};

pub use session::{SessionConfig, SessionError, SessionId, SessionStore, SESSION_HEADER};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{generate_default_config, Config, ConfigError, LoggingConfig};
