//! Chart configs for the three dashboard mounts, and ownership of the live
//! chart handles.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone};

use crate::config;
use crate::format;
use crate::models::{
    Axis, ChartConfig, ChartData, ChartKind, ChartOptions, Colors, Dataset, Legend,
    LegendPosition, PriceSeriesSet, Scales, Ticks, TrendCounts,
};
use crate::page::{ChartHandle, Page};
use crate::queries::{prices, trends};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Line chart of the leading price series over the trailing 24 hours.
///
/// With no snapshot loaded the chart is empty: no series and no labels.
pub fn price_chart<Tz: TimeZone>(set: Option<&PriceSeriesSet>, now: &DateTime<Tz>) -> ChartConfig {
    let mut data = ChartData::default();

    if let Some(set) = set {
        let series = prices::leading_series(set, config::MAX_PRICE_SERIES, config::PRICE_WINDOW);
        data.datasets = series
            .into_iter()
            .enumerate()
            .map(|(index, s)| {
                let color = config::PRICE_PALETTE[index % config::PRICE_PALETTE.len()];
                Dataset {
                    label: Some(s.label),
                    data: s.values,
                    border_color: Some(color.to_string()),
                    background_color: Some(Colors::Single(format!(
                        "{color}{}",
                        config::PRICE_FILL_ALPHA
                    ))),
                    tension: Some(0.4),
                    fill: Some(false),
                    ..Dataset::default()
                }
            })
            .collect();
        data.labels = format::trailing_hour_labels(now, config::PRICE_WINDOW);
    }

    let mut options = ChartOptions::titled(
        "Price dynamics (last 24 hours)",
        Legend::at(LegendPosition::Bottom),
    );
    options.scales = Some(Scales {
        y: Axis {
            begin_at_zero: false,
            ticks: Ticks {
                unit_suffix: Some(config::CURRENCY.to_string()),
                ..Ticks::default()
            },
        },
    });

    ChartConfig {
        kind: ChartKind::Line,
        data,
        options,
    }
}

/// Doughnut of the fixed category distribution.
pub fn category_chart() -> ChartConfig {
    let categories = config::category_distribution();
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: categories.iter().map(|(name, _)| name.to_string()).collect(),
            datasets: vec![Dataset {
                data: categories.iter().map(|(_, share)| f64::from(*share)).collect(),
                background_color: Some(Colors::PerPoint(
                    config::CATEGORY_PALETTE.iter().map(|c| c.to_string()).collect(),
                )),
                border_width: Some(0),
                ..Dataset::default()
            }],
        },
        options: ChartOptions::titled(
            "Category distribution",
            Legend::at(LegendPosition::Bottom),
        ),
    }
}

/// Bar chart of the most searched queries.
pub fn trends_chart(counts: Option<&TrendCounts>) -> ChartConfig {
    let (labels, values): (Vec<String>, Vec<f64>) = counts
        .map(|counts| {
            trends::top_trends(counts, config::TOP_TRENDS)
                .into_iter()
                .map(|(query, count)| (trends::truncate_label(&query), count as f64))
                .unzip()
        })
        .unwrap_or_default();

    let mut options = ChartOptions::titled(
        format!("Top {} queries", config::TOP_TRENDS),
        Legend::hidden(),
    );
    options.scales = Some(Scales {
        y: Axis {
            begin_at_zero: true,
            ticks: Ticks {
                step_size: Some(1.0),
                ..Ticks::default()
            },
        },
    });

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: Some("Searches".to_string()),
                data: values,
                background_color: Some(Colors::Single(config::TRENDS_COLOR.to_string())),
                border_radius: Some(5),
                ..Dataset::default()
            }],
        },
        options,
    }
}

// ---------------------------------------------------------------------------
// ChartSet
// ---------------------------------------------------------------------------

/// The dashboard's chart mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    Price,
    Category,
    Trends,
}

impl ChartSlot {
    pub fn mount(self) -> &'static str {
        match self {
            ChartSlot::Price => config::PRICE_CHART_ID,
            ChartSlot::Category => config::CATEGORY_CHART_ID,
            ChartSlot::Trends => config::TRENDS_CHART_ID,
        }
    }
}

/// Owns at most one live chart per slot.
#[derive(Debug, Default)]
pub struct ChartSet {
    handles: HashMap<ChartSlot, ChartHandle>,
}

impl ChartSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy whatever is at `slot` and draw `config` in its place.
    ///
    /// Returns `false` without touching the page or the old chart when the
    /// mount is missing.
    pub fn replace<P: Page + ?Sized>(&mut self, page: &mut P, slot: ChartSlot, config: &ChartConfig) -> bool {
        let mount = slot.mount();
        if !page.has_element(mount) {
            tracing::debug!(mount, "chart mount missing, skipping render");
            return false;
        }
        if let Some(old) = self.handles.remove(&slot) {
            page.destroy_chart(old);
        }
        match page.create_chart(mount, config) {
            Some(handle) => {
                self.handles.insert(slot, handle);
                true
            }
            None => false,
        }
    }

    pub fn is_rendered(&self, slot: ChartSlot) -> bool {
        self.handles.contains_key(&slot)
    }

    pub fn handle(&self, slot: ChartSlot) -> Option<&ChartHandle> {
        self.handles.get(&slot)
    }

    /// Destroy every live chart.
    pub fn clear<P: Page + ?Sized>(&mut self, page: &mut P) {
        for (_, handle) in self.handles.drain() {
            page.destroy_chart(handle);
        }
    }
}
