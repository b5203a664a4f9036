//! Per-source article tallies for the dashboard's publisher table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ArticleRecord;

/// Label used when an article carries no publisher attribution
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// One row in the ranked per-source table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceCount {
    pub name: String,
    pub article_count: u64,
}

/// Tally articles per publisher, ranked by count descending.
///
/// Articles without a `source` group under [`UNKNOWN_SOURCE`]. Sources
/// tied on count keep their first-appearance order: the sort is stable,
/// so equal counts never reshuffle between renders.
pub fn source_summary(articles: &[ArticleRecord]) -> Vec<SourceCount> {
    let mut counts: Vec<SourceCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for article in articles {
        let name = article.source.as_deref().unwrap_or(UNKNOWN_SOURCE);
        match index.get(name) {
            Some(&i) => counts[i].article_count += 1,
            None => {
                index.insert(name, counts.len());
                counts.push(SourceCount {
                    name: name.to_string(),
                    article_count: 1,
                });
            }
        }
    }

    // sort_by is stable; equal counts retain encounter order
    counts.sort_by(|a, b| b.article_count.cmp(&a.article_count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArticleRecord;

    fn article(source: Option<&str>) -> ArticleRecord {
        ArticleRecord::with_sentiment_and_source(None, source)
    }

    #[test]
    fn test_empty_input() {
        assert!(source_summary(&[]).is_empty());
    }

    #[test]
    fn test_ranked_descending() {
        let articles = vec![
            article(Some("A")),
            article(Some("B")),
            article(Some("A")),
            article(Some("C")),
            article(Some("B")),
            article(Some("A")),
        ];
        let summary = source_summary(&articles);
        assert_eq!(
            summary,
            vec![
                SourceCount { name: "A".into(), article_count: 3 },
                SourceCount { name: "B".into(), article_count: 2 },
                SourceCount { name: "C".into(), article_count: 1 },
            ]
        );
    }

    #[test]
    fn test_missing_source_groups_under_unknown() {
        let articles = vec![article(None), article(Some("X")), article(None)];
        let summary = source_summary(&articles);
        assert_eq!(summary[0].name, UNKNOWN_SOURCE);
        assert_eq!(summary[0].article_count, 2);
        assert_eq!(summary[1].name, "X");
        assert_eq!(summary[1].article_count, 1);
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let articles = vec![
            article(Some("Kompas")),
            article(Some("Tempo")),
            article(Some("Antara")),
            article(Some("Tempo")),
            article(Some("Kompas")),
            article(Some("Antara")),
        ];
        let summary = source_summary(&articles);
        let names: Vec<&str> = summary.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Kompas", "Tempo", "Antara"]);
    }

    #[test]
    fn test_idempotent() {
        let articles = vec![article(Some("A")), article(None), article(Some("A"))];
        assert_eq!(source_summary(&articles), source_summary(&articles));
    }
}
