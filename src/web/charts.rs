//! Chart view-models embedded into rendered pages
//!
//! The client-side renderer (Chart.js) draws from a JSON blob the server
//! embeds in each page. Charts are collected in an explicit [`ChartRegistry`]
//! keyed by canvas element id; registering a chart under an existing id
//! replaces the previous entry, which is the server-side equivalent of the
//! destroy-and-replace the renderer performs in the browser.

use serde::{Deserialize, Serialize};

use crate::analytics::{SentimentStats, SourceCount};
use crate::i18n::t;

/// Fixed colors for the three sentiment buckets (positive, negative, neutral)
pub const SENTIMENT_COLORS: [&str; 3] = ["#22c55e", "#ef4444", "#eab308"];

/// Bar color for the per-source chart
pub const SOURCE_BAR_COLOR: &str = "#3b82f6";

/// Kind of chart the client renderer should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Donut,
    HorizontalBar,
}

/// One chart the page asks the client to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Canvas element id the chart binds to
    pub element_id: String,
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<String>,
}

impl ChartSpec {
    /// Donut chart of the sentiment distribution with localized bucket labels
    pub fn sentiment_donut(element_id: impl Into<String>, stats: &SentimentStats) -> Self {
        Self {
            element_id: element_id.into(),
            kind: ChartKind::Donut,
            title: t!("dashboard.sentiment_chart").to_string(),
            labels: vec![
                t!("sentiment.positive").to_string(),
                t!("sentiment.negative").to_string(),
                t!("sentiment.neutral").to_string(),
            ],
            values: vec![
                stats.positive as f64,
                stats.negative as f64,
                stats.neutral as f64,
            ],
            colors: SENTIMENT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Horizontal bar chart of the ranked per-source tallies
    pub fn sources_bar(element_id: impl Into<String>, summary: &[SourceCount]) -> Self {
        Self {
            element_id: element_id.into(),
            kind: ChartKind::HorizontalBar,
            title: t!("dashboard.sources_table").to_string(),
            labels: summary.iter().map(|s| s.name.clone()).collect(),
            values: summary.iter().map(|s| s.article_count as f64).collect(),
            colors: vec![SOURCE_BAR_COLOR.to_string(); summary.len()],
        }
    }
}

/// Collection of charts for one page, keyed by element id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartRegistry {
    charts: Vec<ChartSpec>,
}

impl ChartRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chart, replacing any existing chart on the same element
    pub fn register(&mut self, spec: ChartSpec) {
        if let Some(existing) = self
            .charts
            .iter_mut()
            .find(|c| c.element_id == spec.element_id)
        {
            *existing = spec;
        } else {
            self.charts.push(spec);
        }
    }

    /// Registered charts in insertion order
    pub fn charts(&self) -> &[ChartSpec] {
        &self.charts
    }

    /// Number of registered charts
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// True when no charts are registered
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Serialize for embedding into the page
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.charts).unwrap_or_default()
    }

    /// Serialize for embedding inside an inline `<script>` element.
    ///
    /// Chart labels carry backend-supplied source names, and serde_json
    /// leaves `<` as-is, so a hostile name could close the script element.
    /// Escaping `<` as the JSON unicode escape keeps the output valid JSON
    /// while making it inert in script context.
    pub fn to_script_json(&self) -> String {
        self.to_json().to_string().replace('<', "\\u003c")
    }
}
