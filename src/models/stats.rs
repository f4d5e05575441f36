use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StatsSnapshot — aggregate counters written by the daily report job
// ---------------------------------------------------------------------------

/// Every field is optional; absent fields render as placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_searches: Option<f64>,
    pub new_ads: Option<f64>,
    pub avg_price: Option<f64>,
    pub top_query: Option<String>,
    /// Report date as written by the producer.
    pub date: Option<String>,
    /// Producer-side generation time.
    pub last_update: Option<String>,
}
