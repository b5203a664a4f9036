//! Configuration management for the kabar dashboard
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::backend::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Backend API configuration
    pub backend: BackendConfig,

    /// Session configuration
    pub session: SessionConfig,

    /// Login configuration
    pub auth: AuthConfig,

    /// UI configuration
    pub ui: UiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind the dashboard server to
    pub bind_address: SocketAddr,

    /// Enable CORS for the JSON endpoints
    pub enable_cors: bool,

    /// Enable per-request tracing
    pub enable_request_logging: bool,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend base URL
    pub base_url: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retry count for read requests
    pub retry_count: u32,

    /// Delay between retries in milliseconds
    pub retry_delay_ms: u64,
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    pub cookie_name: String,

    /// Idle timeout in seconds before a session expires
    pub idle_timeout_secs: u64,

    /// How often the expiry sweep runs, in seconds
    pub sweep_interval_secs: u64,
}

/// Login configuration
///
/// Users are declared statically; real identity management belongs to an
/// external provider and is out of scope for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Allow anonymous guest sessions
    pub allow_guest: bool,

    /// Declared users
    #[serde(default)]
    pub users: Vec<UserCredential>,
}

/// A declared dashboard user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,

    /// Hex-encoded SHA-256 digest of the password
    pub password_sha256: String,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display locale (en, id)
    pub locale: String,

    /// Recent-article count on the dashboard
    pub recent_limit: usize,

    /// Maximum favorites fetched for the favorites page
    pub favorites_limit: usize,

    /// Maximum entries fetched for the history page
    pub history_limit: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bind_address = std::env::var("KABAR_BIND_ADDRESS")
            .ok()
            .and_then(|v| v.parse::<SocketAddr>().ok())
            .unwrap_or_else(|| "127.0.0.1:8000".parse().expect("valid literal"));

        let backend_url = std::env::var("BACKEND_API_URL")
            .or_else(|_| std::env::var("KABAR_BACKEND_URL"))
            .unwrap_or_else(|_| String::from("http://localhost:5000"));

        let request_timeout_secs = std::env::var("KABAR_BACKEND_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_secs = std::env::var("KABAR_SESSION_IDLE_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(7200);

        let allow_guest = std::env::var("KABAR_ALLOW_GUEST")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(true);

        let locale = std::env::var("KABAR_LANG").unwrap_or_else(|_| String::from("id"));

        let log_level = std::env::var("KABAR_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let log_format = std::env::var("KABAR_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            server: ServerConfig {
                bind_address,
                enable_cors: false,
                enable_request_logging: true,
            },
            backend: BackendConfig {
                base_url: backend_url,
                request_timeout_secs,
                retry_count: 2,
                retry_delay_ms: 500,
            },
            session: SessionConfig {
                cookie_name: String::from("kabar_session"),
                idle_timeout_secs,
                sweep_interval_secs: 60,
            },
            auth: AuthConfig {
                allow_guest,
                users: Vec::new(),
            },
            ui: UiConfig {
                locale,
                recent_limit: 10,
                favorites_limit: 100,
                history_limit: 50,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.is_empty() {
            anyhow::bail!("backend.base_url must not be empty");
        }

        if self.backend.request_timeout_secs == 0 {
            anyhow::bail!("backend.request_timeout_secs must be greater than 0");
        }

        if self.session.idle_timeout_secs == 0 {
            anyhow::bail!("session.idle_timeout_secs must be greater than 0");
        }

        if self.session.cookie_name.is_empty() {
            anyhow::bail!("session.cookie_name must not be empty");
        }

        if !self.auth.allow_guest && self.auth.users.is_empty() {
            anyhow::bail!("auth.users must not be empty when guests are disabled");
        }

        for user in &self.auth.users {
            if user.password_sha256.len() != 64
                || !user.password_sha256.chars().all(|c| c.is_ascii_hexdigit())
            {
                anyhow::bail!(
                    "auth user '{}' must carry a hex SHA-256 password digest",
                    user.username
                );
            }
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.request_timeout_secs)
    }

    /// Build the backend client configuration
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.backend.base_url.clone())
            .with_timeout(self.request_timeout())
            .with_retry_count(self.backend.retry_count)
            .with_retry_delay(Duration::from_millis(self.backend.retry_delay_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env().expect("environment-based defaults are infallible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ui.recent_limit, 10);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.backend.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_login_path() {
        let mut config = Config::default();
        config.auth.allow_guest = false;
        config.auth.users.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_malformed_digest() {
        let mut config = Config::default();
        config.auth.users.push(UserCredential {
            username: "ana".into(),
            password_sha256: "not-a-digest".into(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_client_config_from_config() {
        let config = Config::default();
        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_secs(30));
    }
}
