//! Backend API client used by every request handler
//!
//! Endpoints mirror the backend's `/v1` REST surface. Reads are retried a
//! bounded number of times; mutations are sent exactly once.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::models::{
    ArticleRecord, FavoriteStatus, HistoryEntry, NewSource, NewsSource, SourcePatch,
};

use super::BackendError;

// ============================================================================
// Client Configuration
// ============================================================================

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. `http://localhost:5000`)
    pub base_url: String,

    /// Request timeout
    pub timeout: Duration,

    /// Retry count for failed read requests
    pub retry_count: u32,

    /// Retry delay
    pub retry_delay: Duration,
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: Duration::from_secs(30),
            retry_count: 2,
            retry_delay: Duration::from_millis(500),
        }
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry count
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Set retry delay
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

// ============================================================================
// Backend Client
// ============================================================================

/// Client for the backend REST API
pub struct BackendClient {
    config: ClientConfig,
    http_client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(config: ClientConfig) -> Result<Self, BackendError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BackendError::Init(e.to_string()))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Backend base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // ------------------------------------------------------------------
    // Articles
    // ------------------------------------------------------------------

    /// List articles, optionally filtered by search query and/or source
    pub async fn articles(
        &self,
        query: Option<&str>,
        source: Option<&str>,
    ) -> Result<Vec<ArticleRecord>, BackendError> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(q) = query {
            params.push(("q", q));
        }
        if let Some(s) = source {
            params.push(("source", s));
        }
        self.get_json("/v1/articles", &params).await
    }

    /// Article list, substituting empty on failure.
    ///
    /// The aggregation layer takes a possibly-empty sequence and never an
    /// error; fetch failures surface as empty-state UI.
    pub async fn articles_or_empty(
        &self,
        query: Option<&str>,
        source: Option<&str>,
    ) -> Vec<ArticleRecord> {
        match self.articles(query, source).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch articles, rendering empty state");
                Vec::new()
            }
        }
    }

    /// Fetch one article by id
    pub async fn article(&self, id: i64) -> Result<ArticleRecord, BackendError> {
        self.get_json(&format!("/v1/article/{id}"), &[]).await
    }

    /// Most recent articles for the dashboard
    pub async fn recent_articles(&self, limit: usize) -> Result<Vec<ArticleRecord>, BackendError> {
        let limit = limit.to_string();
        self.get_json("/v1/dashboard/articles/recent", &[("limit", limit.as_str())])
            .await
    }

    /// Recent articles, substituting empty on failure
    pub async fn recent_articles_or_empty(&self, limit: usize) -> Vec<ArticleRecord> {
        match self.recent_articles(limit).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch recent articles");
                Vec::new()
            }
        }
    }

    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// List favorite articles
    pub async fn favorites(&self, limit: usize) -> Result<Vec<ArticleRecord>, BackendError> {
        let limit = limit.to_string();
        self.get_json("/v1/favorites", &[("limit", limit.as_str())])
            .await
    }

    /// Favorites, substituting empty on failure
    pub async fn favorites_or_empty(&self, limit: usize) -> Vec<ArticleRecord> {
        match self.favorites(limit).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch favorites");
                Vec::new()
            }
        }
    }

    /// Check whether an article is a favorite
    pub async fn check_favorite(&self, id: i64) -> Result<FavoriteStatus, BackendError> {
        self.get_json(&format!("/v1/favorites/{id}/check"), &[])
            .await
    }

    /// Mark an article as favorite
    pub async fn add_favorite(&self, id: i64) -> Result<(), BackendError> {
        self.send_no_body(reqwest::Method::POST, &format!("/v1/favorites/{id}"))
            .await
    }

    /// Remove an article from favorites
    pub async fn remove_favorite(&self, id: i64) -> Result<(), BackendError> {
        self.send_no_body(reqwest::Method::DELETE, &format!("/v1/favorites/{id}"))
            .await
    }

    // ------------------------------------------------------------------
    // Search history
    // ------------------------------------------------------------------

    /// Record a search keyword in the history
    pub async fn save_search(&self, keyword: &str) -> Result<(), BackendError> {
        let url = format!("{}/v1/search-history", self.config.base_url);
        let response = self
            .http_client
            .post(&url)
            .query(&[("keyword", keyword)])
            .send()
            .await?;
        Self::check_status(response).await.map(|_| ())
    }

    /// List saved searches
    pub async fn search_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, BackendError> {
        let limit = limit.to_string();
        self.get_json("/v1/search-history", &[("limit", limit.as_str())])
            .await
    }

    /// Search history, substituting empty on failure
    pub async fn search_history_or_empty(&self, limit: usize) -> Vec<HistoryEntry> {
        match self.search_history(limit).await {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch search history");
                Vec::new()
            }
        }
    }

    /// Delete one saved search
    pub async fn delete_search(&self, id: i64) -> Result<(), BackendError> {
        self.send_no_body(reqwest::Method::DELETE, &format!("/v1/search-history/{id}"))
            .await
    }

    /// Clear the entire search history
    pub async fn clear_search_history(&self) -> Result<(), BackendError> {
        self.send_no_body(reqwest::Method::DELETE, "/v1/search-history")
            .await
    }

    // ------------------------------------------------------------------
    // Sources (master data)
    // ------------------------------------------------------------------

    /// List registered crawl sources
    pub async fn sources(&self) -> Result<Vec<NewsSource>, BackendError> {
        self.get_json("/v1/sources", &[]).await
    }

    /// Sources, substituting empty on failure
    pub async fn sources_or_empty(&self) -> Vec<NewsSource> {
        match self.sources().await {
            Ok(sources) => sources,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch sources");
                Vec::new()
            }
        }
    }

    /// Register a new crawl source
    pub async fn create_source(&self, source: &NewSource) -> Result<NewsSource, BackendError> {
        self.send_json(reqwest::Method::POST, "/v1/sources", source)
            .await
    }

    /// Update an existing crawl source
    pub async fn update_source(
        &self,
        id: i64,
        patch: &SourcePatch,
    ) -> Result<NewsSource, BackendError> {
        self.send_json(reqwest::Method::PUT, &format!("/v1/sources/{id}"), patch)
            .await
    }

    /// Delete a crawl source
    pub async fn delete_source(&self, id: i64) -> Result<(), BackendError> {
        self.send_no_body(reqwest::Method::DELETE, &format!("/v1/sources/{id}"))
            .await
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// Probe backend health; short 5 second timeout, never errors
    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.config.base_url);
        match self
            .http_client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    // GET with bounded retry
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.config.base_url, path);
        let mut last_error = None;

        for attempt in 0..=self.config.retry_count {
            if attempt > 0 {
                tokio::time::sleep(self.config.retry_delay).await;
                tracing::debug!(url = %url, attempt, "Retrying backend request");
            }

            let request = self.http_client.get(&url).query(params);
            match request.send().await {
                Ok(response) => match Self::check_status(response).await {
                    Ok(response) => match response.json::<T>().await {
                        Ok(data) => return Ok(data),
                        Err(e) => {
                            last_error = Some(BackendError::Parse(e.to_string()));
                        }
                    },
                    Err(e) => last_error = Some(e),
                },
                Err(e) => last_error = Some(e.into()),
            }
        }

        Err(last_error.unwrap_or(BackendError::Unavailable))
    }

    // Mutations go exactly once; a retried POST could double-apply
    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self.http_client.request(method, &url).json(body).send().await?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    async fn send_no_body(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<(), BackendError> {
        let url = format!("{}{}", self.config.base_url, path);
        let response = self.http_client.request(method, &url).send().await?;
        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(BackendError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            })
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_strips_trailing_slash() {
        let config = ClientConfig::new("http://localhost:5000/");
        assert_eq!(config.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new("http://localhost:5000")
            .with_timeout(Duration::from_secs(10))
            .with_retry_count(5);

        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.retry_count, 5);
    }

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::default();
        let client = BackendClient::new(config);
        assert!(client.is_ok());
    }
}
