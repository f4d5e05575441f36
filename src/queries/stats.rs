//! Counter text for the stats snapshot.

use crate::config;
use crate::format;
use crate::models::StatsSnapshot;

/// The four counter texts, with placeholders already substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsDisplay {
    pub total_searches: String,
    pub new_ads: String,
    pub avg_price: String,
    pub top_query: String,
}

impl StatsDisplay {
    pub fn from_snapshot(stats: &StatsSnapshot) -> Self {
        Self {
            total_searches: stats
                .total_searches
                .map(format::grouped)
                .unwrap_or_else(|| "0".to_string()),
            new_ads: stats
                .new_ads
                .map(format::grouped)
                .unwrap_or_else(|| "0".to_string()),
            avg_price: format::price(stats.avg_price.unwrap_or(0.0)),
            top_query: stats
                .top_query
                .as_deref()
                .filter(|q| !q.is_empty())
                .unwrap_or(config::MISSING_TEXT)
                .to_string(),
        }
    }

    /// `(element id, text)` pairs in display order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            (config::TOTAL_SEARCHES_ID, self.total_searches.as_str()),
            (config::NEW_ADS_ID, self.new_ads.as_str()),
            (config::AVG_PRICE_ID, self.avg_price.as_str()),
            (config::TOP_QUERY_ID, self.top_query.as_str()),
        ]
    }
}
