//! Common test utilities

use chrono::Utc;
use kabar::models::ArticleRecord;

/// Create a test article with default values
#[allow(dead_code)]
pub fn create_test_article() -> ArticleRecord {
    ArticleRecord {
        id: 1,
        title: "Harga pangan stabil menjelang lebaran".to_string(),
        url: "https://example.com/berita/1".to_string(),
        content: Some("Isi berita untuk pengujian.".to_string()),
        source: Some("Antara".to_string()),
        sentiment: Some("positive".to_string()),
        category: Some("ekonomi".to_string()),
        author: Some("Redaksi".to_string()),
        published_date: Some(Utc::now()),
        crawled_date: Some(Utc::now()),
    }
}

/// Create an article carrying only a sentiment and source
#[allow(dead_code)]
pub fn article(sentiment: Option<&str>, source: Option<&str>) -> ArticleRecord {
    ArticleRecord::with_sentiment_and_source(sentiment, source)
}

/// Create a batch of articles from (sentiment, source) pairs
#[allow(dead_code)]
pub fn articles(pairs: &[(Option<&str>, Option<&str>)]) -> Vec<ArticleRecord> {
    pairs
        .iter()
        .map(|(sentiment, source)| article(*sentiment, *source))
        .collect()
}
