//! Windowing of price histories into chart series.

use crate::models::{PricePoint, PriceSeriesSet};

/// One labelled line of the price chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// The last `window` prices of `points`, in original order.
pub fn last_prices(points: &[PricePoint], window: usize) -> Vec<f64> {
    let start = points.len().saturating_sub(window);
    points[start..].iter().map(|p| p.price).collect()
}

/// Series for the first `max_series` queries in document order.
pub fn leading_series(set: &PriceSeriesSet, max_series: usize, window: usize) -> Vec<PriceSeries> {
    set.iter()
        .take(max_series)
        .map(|(query, points)| PriceSeries {
            label: query.to_string(),
            values: last_prices(points, window),
        })
        .collect()
}
