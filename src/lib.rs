//! kabar - News Sentiment Dashboard Frontend
//!
//! A server-rendered dashboard for a news-sentiment-analytics product.
//! Articles, favorites, search history, and news sources live in a separate
//! backend REST API; this crate authenticates users (or admits guest
//! sessions), proxies calls to that backend, aggregates sentiment and
//! per-source statistics, and renders HTML views with embedded charts.
//!
//! # Architecture
//!
//! - [`analytics`] - Sentiment distribution and per-source aggregation
//! - [`backend`] - HTTP client for the backend REST API
//! - [`web`] - Axum server, routes, sessions, views, and chart view-models
//! - [`models`] - Records exchanged with the backend
//! - [`config`] - Configuration management and settings
//! - [`i18n`] - Localized display strings (English, Indonesian)
//!
//! # Example
//!
//! ```no_run
//! use kabar::config::Config;
//! use kabar::web::DashboardServer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = DashboardServer::new(config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod analytics;
pub mod backend;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod web;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{sentiment_stats, source_summary, SentimentStats, SourceCount};
    pub use crate::backend::{BackendClient, ClientConfig};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, KabarErrorTrait, Result};
    pub use crate::models::{ArticleRecord, HistoryEntry, NewsSource};
    pub use crate::web::DashboardServer;
}

// Direct re-exports for convenience
pub use models::{ArticleRecord, HistoryEntry, NewsSource};
