//! Sentiment distribution over a set of articles
//!
//! Labels arrive from the backend as free text in either English or
//! Indonesian (`positive`/`positif`, `negative`/`negatif`,
//! `neutral`/`netral`) and are often missing entirely. Classification is a
//! two-step pipeline: normalize the raw label (default, trim, lowercase),
//! then map it onto exactly one of three buckets. Unrecognized labels are
//! not errors; they count as neutral.

use serde::{Deserialize, Serialize};

use crate::models::ArticleRecord;

/// Three-way sentiment bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a raw sentiment label into a bucket.
    ///
    /// Absent labels default to `"neutral"` before normalization, so a
    /// missing field and an explicit `"neutral"` classify identically.
    pub fn classify(raw: Option<&str>) -> Self {
        let normalized = raw.unwrap_or("neutral").trim().to_lowercase();
        Self::from_normalized(&normalized)
    }

    // Expects an already trimmed, lowercased label
    fn from_normalized(label: &str) -> Self {
        match label {
            "positive" | "positif" => Self::Positive,
            "negative" | "negatif" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-bucket share of the total, each rounded to one decimal place.
///
/// Buckets are rounded independently, so the three values need not sum to
/// exactly 100.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SentimentPercentages {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

/// Sentiment distribution over a set of articles
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SentimentStats {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    /// Always `positive + negative + neutral`
    pub total: u64,
    pub percentages: SentimentPercentages,
}

/// Count articles per sentiment bucket and compute each bucket's share.
///
/// Percentages divide by `max(1, total)`, so the empty input yields all
/// zeroes rather than a division by zero.
pub fn sentiment_stats(articles: &[ArticleRecord]) -> SentimentStats {
    let mut positive = 0u64;
    let mut negative = 0u64;
    let mut neutral = 0u64;

    for article in articles {
        match SentimentLabel::classify(article.sentiment.as_deref()) {
            SentimentLabel::Positive => positive += 1,
            SentimentLabel::Negative => negative += 1,
            SentimentLabel::Neutral => neutral += 1,
        }
    }

    let total = positive + negative + neutral;
    let safe_total = total.max(1) as f64;

    SentimentStats {
        positive,
        negative,
        neutral,
        total,
        percentages: SentimentPercentages {
            positive: round_percent(positive as f64 / safe_total),
            negative: round_percent(negative as f64 / safe_total),
            neutral: round_percent(neutral as f64 / safe_total),
        },
    }
}

// Fraction -> percentage rounded to one decimal place
fn round_percent(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}
