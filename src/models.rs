// Records exchanged with the backend API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article as returned by the backend.
///
/// The backend JSON is loosely typed: `sentiment` and `source` are free-text
/// and frequently absent. Every optional field defaults so a partial payload
/// still deserializes; resolving the defaults is the aggregation layer's job.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ArticleRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Publisher name, absent when the crawler could not attribute one
    #[serde(default)]
    pub source: Option<String>,
    /// Free-text sentiment label (`positive`/`positif`, `negative`/`negatif`,
    /// `neutral`/`netral`, or anything else the classifier emitted)
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub crawled_date: Option<DateTime<Utc>>,
}

impl ArticleRecord {
    /// Create a record with only the fields the aggregator reads
    pub fn with_sentiment_and_source(
        sentiment: Option<&str>,
        source: Option<&str>,
    ) -> Self {
        Self {
            sentiment: sentiment.map(str::to_string),
            source: source.map(str::to_string),
            ..Default::default()
        }
    }
}

/// A crawl source registered in the backend's master data
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NewsSource {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub base_url: String,
    /// `rss`, `html`, `sitemap`, or `auto`
    #[serde(default = "default_crawl_type")]
    pub crawl_type: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub is_hardcoded: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_crawl_type() -> String {
    "auto".to_string()
}

fn default_true() -> bool {
    true
}

/// Payload for creating a new crawl source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSource {
    pub name: String,
    pub base_url: String,
    #[serde(default = "default_crawl_type")]
    pub crawl_type: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_true")]
    pub auto_detect: bool,
}

impl NewSource {
    /// Build the create payload the backend expects, including the
    /// default auto-detect selector configuration
    pub fn from_form(name: String, base_url: String) -> Self {
        Self {
            name,
            base_url,
            crawl_type: default_crawl_type(),
            active: true,
            auto_detect: true,
        }
    }
}

/// Partial update for an existing crawl source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl SourcePatch {
    /// True when the patch carries no changes
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.base_url.is_none() && self.active.is_none()
    }
}

/// A saved search in the backend's history
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: i64,
    pub keyword: String,
    #[serde(default)]
    pub search_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Favorite check response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct FavoriteStatus {
    #[serde(default)]
    pub is_favorite: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserializes_with_missing_fields() {
        let article: ArticleRecord = serde_json::from_str(r#"{"id": 7, "title": "t"}"#).unwrap();
        assert_eq!(article.id, 7);
        assert!(article.sentiment.is_none());
        assert!(article.source.is_none());
    }

    #[test]
    fn test_source_defaults() {
        let source: NewsSource =
            serde_json::from_str(r#"{"name": "Antara", "base_url": "https://antaranews.com"}"#)
                .unwrap();
        assert_eq!(source.crawl_type, "auto");
        assert!(source.active);
        assert!(!source.is_hardcoded);
    }

    #[test]
    fn test_source_patch_skips_absent_fields() {
        let patch = SourcePatch {
            active: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"active":false}"#);
    }

    #[test]
    fn test_empty_patch() {
        assert!(SourcePatch::default().is_empty());
    }
}
