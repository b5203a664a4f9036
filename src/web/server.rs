//! Dashboard server implementation
//!
//! Wires the backend client, session store, and view engine into a single
//! axum application and runs it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::BackendClient;
use crate::config::Config;
use crate::error::{Error, Result};

use super::routes::create_router;
use super::session::SessionStore;
use super::views::ViewEngine;

// ============================================================================
// App State
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Client for the analytics backend
    pub backend: Arc<BackendClient>,

    /// In-memory session registry
    pub sessions: Arc<SessionStore>,

    /// Template engine
    pub views: Arc<ViewEngine>,

    /// Server start time
    pub start_time: Instant,

    /// Configuration
    pub config: Arc<Config>,
}

// ============================================================================
// Dashboard Server
// ============================================================================

/// Main dashboard server
pub struct DashboardServer {
    config: Arc<Config>,
    state: AppState,
}

impl DashboardServer {
    /// Create a new dashboard server
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(|e| Error::config(e.to_string()))?;

        let backend = Arc::new(BackendClient::new(config.client_config())?);
        let sessions = Arc::new(SessionStore::new(config.session.idle_timeout_secs));
        let views = Arc::new(ViewEngine::new()?);

        let config = Arc::new(config);
        let state = AppState {
            backend,
            sessions,
            views,
            start_time: Instant::now(),
            config: config.clone(),
        };

        Ok(Self { config, state })
    }

    /// Get the application state
    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        let mut router = create_router(self.state.clone());

        if self.config.server.enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.config.server.enable_request_logging {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    /// Start the server
    pub async fn start(&self) -> Result<()> {
        let router = self.build_router();
        let addr = self.config.server.bind_address;

        tracing::info!("Starting dashboard server on {}", addr);

        self.start_background_tasks();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .await
            .map_err(|e| Error::with_source("HTTP server failed", e))?;

        Ok(())
    }

    /// Start with graceful shutdown
    pub async fn start_with_shutdown(
        &self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let router = self.build_router();
        let addr = self.config.server.bind_address;

        tracing::info!("Starting dashboard server on {} (with graceful shutdown)", addr);

        self.start_background_tasks();

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| Error::with_source("HTTP server failed", e))?;

        tracing::info!("Dashboard server shutdown complete");
        Ok(())
    }

    /// Start background tasks
    fn start_background_tasks(&self) {
        // Evict idle sessions on a fixed interval
        let sessions = self.state.sessions.clone();
        let sweep_interval = self.config.session.sweep_interval_secs;
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(sweep_interval));
            loop {
                interval.tick().await;
                let removed = sessions.sweep_expired().await;
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired sessions");
                }
            }
        });

        tracing::info!("Background tasks started");
    }

    /// Get server info
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            bind_address: self.config.server.bind_address,
            backend_url: self.config.backend.base_url.clone(),
            session_idle_timeout_secs: self.config.session.idle_timeout_secs,
            guest_access_enabled: self.config.auth.allow_guest,
            cors_enabled: self.config.server.enable_cors,
            request_logging_enabled: self.config.server.enable_request_logging,
        }
    }
}

/// Server information
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub bind_address: SocketAddr,
    pub backend_url: String,
    pub session_idle_timeout_secs: u64,
    pub guest_access_enabled: bool,
    pub cors_enabled: bool,
    pub request_logging_enabled: bool,
}

impl ServerInfo {
    /// Format as display string
    pub fn display(&self) -> String {
        format!(
            "Dashboard Server\n\
             {:-<40}\n\
             Bind Address: {}\n\
             Backend URL: {}\n\
             Session Idle Timeout: {}s\n\
             Guest Access: {}\n\
             CORS: {}\n\
             Request Logging: {}",
            "",
            self.bind_address,
            self.backend_url,
            self.session_idle_timeout_secs,
            if self.guest_access_enabled { "enabled" } else { "disabled" },
            if self.cors_enabled { "enabled" } else { "disabled" },
            if self.request_logging_enabled { "enabled" } else { "disabled" }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        let server = DashboardServer::new(config);
        assert!(server.is_ok());
    }

    #[test]
    fn test_server_info() {
        let config = Config::default();
        let server = DashboardServer::new(config).unwrap();
        let info = server.info();

        assert!(info.guest_access_enabled);
        assert!(info.backend_url.starts_with("http"));
    }

    #[tokio::test]
    async fn test_app_state_components() {
        let config = Config::default();
        let server = DashboardServer::new(config).unwrap();
        let state = server.state();

        assert!(state.sessions.is_empty().await);
        assert!(state
            .views
            .template_names()
            .contains(&"dashboard".to_string()));
    }
}
