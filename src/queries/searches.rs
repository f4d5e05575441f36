//! Trending queries and daily counts from the recent-searches log.

use chrono::NaiveDate;

use crate::models::{OrderedMap, SearchEvent};

/// Group events by query and return the `limit` most frequent.
///
/// Input order is not trusted for ranking; ties fall back to first-seen order
/// so the result is stable for a fixed input.
pub fn trending(events: &[SearchEvent], limit: usize) -> Vec<(String, usize)> {
    let mut counts: OrderedMap<usize> = OrderedMap::new();
    for event in events {
        *counts.entry_or_default(&event.query) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .iter()
        .map(|(query, count)| (query.to_string(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Number of events whose timestamp starts with `day` as `YYYY-MM-DD`.
pub fn count_on(events: &[SearchEvent], day: NaiveDate) -> usize {
    let prefix = day.format("%Y-%m-%d").to_string();
    events
        .iter()
        .filter(|e| e.timestamp.starts_with(&prefix))
        .count()
}

/// List item text for a trending query.
pub fn item_text(query: &str, count: usize) -> String {
    format!("🔍 {query} {count}")
}
