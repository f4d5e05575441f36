use std::time::Duration;

// Snapshot resources, relative to the dashboard page.
pub const STATS_PATH: &str = "dashboard_stats.json";
pub const PRICES_PATH: &str = "../data/prices.json";
pub const TRENDS_PATH: &str = "../data/trends.json";
// Site-root relative.
pub const SEARCHES_PATH: &str = "/data/searches/latest.json";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(300_000);

// Element IDs
pub const TOTAL_SEARCHES_ID: &str = "totalSearches";
pub const NEW_ADS_ID: &str = "newAds";
pub const AVG_PRICE_ID: &str = "avgPrice";
pub const TOP_QUERY_ID: &str = "topQuery";
pub const UPDATE_TIME_ID: &str = "updateTime";
pub const TRENDING_LIST_ID: &str = "trending-searches";
pub const SEARCHES_TODAY_ID: &str = "searches-today";

// Chart mounts
pub const PRICE_CHART_ID: &str = "priceChart";
pub const CATEGORY_CHART_ID: &str = "categoryChart";
pub const TRENDS_CHART_ID: &str = "trendsChart";

pub const CURRENCY: &str = "₽";
pub const THOUSANDS_SEPARATOR: char = ',';
pub const MISSING_TEXT: &str = "—";
pub const UPDATE_TIME_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

pub const PRICE_WINDOW: usize = 24;
pub const MAX_PRICE_SERIES: usize = 3;
pub const PRICE_PALETTE: [&str; 3] = ["#667eea", "#764ba2", "#48bb78"];
pub const PRICE_FILL_ALPHA: &str = "20";

pub const TOP_TRENDS: usize = 8;
pub const LABEL_MAX_CHARS: usize = 15;
pub const LABEL_KEEP_CHARS: usize = 12;
pub const ELLIPSIS: &str = "...";
pub const TRENDS_COLOR: &str = "#4ecdc4";

pub const TOP_SEARCHES: usize = 5;

/// Placeholder distribution until category aggregation exists upstream.
pub fn category_distribution() -> Vec<(&'static str, u32)> {
    vec![
        ("Electronics", 35),
        ("Transport", 25),
        ("Real estate", 20),
        ("Jobs", 12),
        ("Services", 8),
    ]
}

pub const CATEGORY_PALETTE: [&str; 5] = ["#667eea", "#764ba2", "#48bb78", "#f6ad55", "#fc8181"];
