//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiConfig;
use crate::dashboard::MockSource;
use crate::session::SessionConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub mock: MockConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty means same-origin only
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_idle_timeout() -> u64 {
    3600 // 1 hour
}

fn default_max_sessions() -> usize {
    10_000
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Mock data configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MockConfig {
    /// Fixed seed; every render then draws the same series
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("sysdash").join("config.toml")),
            Some(PathBuf::from("/etc/sysdash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (environment in production)
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(host) = lookup("SYSDASH_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SYSDASH_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }

        // Session overrides
        if let Some(secs) = lookup("SYSDASH_SESSION_IDLE_SECS").and_then(|s| s.parse().ok()) {
            self.session.idle_timeout_secs = secs;
        }
        if let Some(max) = lookup("SYSDASH_MAX_SESSIONS").and_then(|s| s.parse().ok()) {
            self.session.max_sessions = max;
        }

        // Mock overrides
        if let Some(seed) = lookup("SYSDASH_MOCK_SEED").and_then(|s| s.parse().ok()) {
            self.mock.seed = Some(seed);
        }

        // Logging overrides
        if let Some(level) = lookup("SYSDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("SYSDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the HTTP layer
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.server.host.clone(),
            port: self.server.port,
            cors_origins: self.server.cors_origins.clone(),
        }
    }

    /// Settings for the session store
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_sessions: self.session.max_sessions,
            idle_timeout: Duration::from_secs(self.session.idle_timeout_secs),
        }
    }

    /// Randomness for render cycles
    pub fn mock_source(&self) -> MockSource {
        MockSource::from_seed(self.mock.seed)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sysdash Configuration
#
# Environment variables override these settings:
# - SYSDASH_HOST
# - SYSDASH_PORT
# - SYSDASH_SESSION_IDLE_SECS
# - SYSDASH_MAX_SESSIONS
# - SYSDASH_MOCK_SEED
# - SYSDASH_LOG_LEVEL
# - SYSDASH_LOG_FORMAT

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8501

# Allowed CORS origins (empty = same origin only)
cors_origins = []

[session]
# Discard sessions idle for longer than this (seconds)
idle_timeout_secs = 3600

# Maximum number of concurrent sessions
max_sessions = 10000

[mock]
# Fixed seed for the sample charts. When set, every render shows the
# same data; leave unset to draw fresh values on every render.
# seed = 42

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/sysdash/sysdash.log"
"#
    .to_string()
}
