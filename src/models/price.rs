use serde::{Deserialize, Serialize};

use super::OrderedMap;

// ---------------------------------------------------------------------------
// PricePoint — one observed price for a query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Query string -> chronological price points.
pub type PriceSeriesSet = OrderedMap<Vec<PricePoint>>;

/// Query string -> occurrence count.
pub type TrendCounts = OrderedMap<u64>;
