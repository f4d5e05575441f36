use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SearchEvent — one entry of the recent searches log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    pub query: String,
    /// ISO-8601, compared by date prefix only.
    pub timestamp: String,
}
