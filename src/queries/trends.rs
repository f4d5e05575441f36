//! Ranking of trend counts for the bar chart.

use crate::config;
use crate::models::TrendCounts;

/// Top `limit` entries by descending count. Ties keep document order.
pub fn top_trends(counts: &TrendCounts, limit: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts
        .iter()
        .map(|(query, count)| (query.to_string(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Shorten labels over `LABEL_MAX_CHARS` to `LABEL_KEEP_CHARS` plus an ellipsis.
///
/// Counts characters, not bytes, so Cyrillic queries are cut cleanly.
pub fn truncate_label(label: &str) -> String {
    if label.chars().count() > config::LABEL_MAX_CHARS {
        let kept: String = label.chars().take(config::LABEL_KEEP_CHARS).collect();
        format!("{kept}{}", config::ELLIPSIS)
    } else {
        label.to_string()
    }
}
