//! Article aggregation for the dashboard views
//!
//! This module provides the pure computations behind the dashboard charts:
//! - Sentiment distribution counts and percentages
//! - Ranked per-source article tallies
//!
//! Both operations are deterministic, allocation-local, and side-effect
//! free; they consume an already-fetched slice of [`ArticleRecord`]s and
//! never touch the backend. Handlers for the dashboard, search results,
//! and history detail all share these two entry points.

mod sentiment;
mod sources;

pub use sentiment::{sentiment_stats, SentimentLabel, SentimentPercentages, SentimentStats};
pub use sources::{source_summary, SourceCount, UNKNOWN_SOURCE};

pub use crate::models::ArticleRecord;
