//! The periodically refreshed dashboard: stats counters plus three charts.
//!
//! A refresh attempt fetches the stats, price and trend snapshots
//! concurrently and commits them only if all three arrive. Any failure is
//! logged and the previous snapshots (and whatever is already drawn) stay in
//! place.

use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info, warn};

use crate::charts::{self, ChartSet, ChartSlot};
use crate::config;
use crate::error::{DashboardError, Result};
use crate::format;
use crate::models::{PriceSeriesSet, StatsSnapshot, TrendCounts};
use crate::page::Page;
use crate::queries::stats::StatsDisplay;
use crate::refresh::AutoRefresh;
use crate::source::SnapshotSource;

/// The last committed set of snapshots.
///
/// Each field is independently optional so a host that supplies its own data
/// via [`DashboardController::apply`] can leave any of them out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshots {
    pub stats: Option<StatsSnapshot>,
    pub prices: Option<PriceSeriesSet>,
    pub trends: Option<TrendCounts>,
}

/// Owns the page, the live chart handles and the last good snapshots.
pub struct DashboardController<P> {
    source: Arc<SnapshotSource>,
    page: P,
    charts: ChartSet,
    snapshots: Snapshots,
    refresh_interval: Duration,
    last_updated: Option<DateTime<Local>>,
}

impl<P: Page> DashboardController<P> {
    pub fn new(source: Arc<SnapshotSource>, page: P, refresh_interval: Duration) -> Self {
        Self {
            source,
            page,
            charts: ChartSet::new(),
            snapshots: Snapshots::default(),
            refresh_interval,
            last_updated: None,
        }
    }

    /// First load: fetch, then draw all three charts.
    pub fn init(&mut self) {
        self.init_at(&Local::now());
    }

    pub fn init_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) {
        self.load_data();
        self.render_price_chart_at(now);
        self.render_category_chart();
        self.render_trends_chart();
    }

    // -- Loading -----------------------------------------------------------

    /// Fetch all three snapshots concurrently without committing anything.
    pub fn fetch_all(&self) -> Result<Snapshots> {
        let source = self.source.as_ref();
        thread::scope(|scope| {
            let stats = scope.spawn(move || source.fetch::<StatsSnapshot>(config::STATS_PATH));
            let prices = scope.spawn(move || source.fetch::<PriceSeriesSet>(config::PRICES_PATH));
            let trends = scope.spawn(move || source.fetch::<TrendCounts>(config::TRENDS_PATH));
            Ok(Snapshots {
                stats: Some(join(stats)?),
                prices: Some(join(prices)?),
                trends: Some(join(trends)?),
            })
        })
    }

    /// One refresh attempt. Returns `true` if a new triad was committed.
    ///
    /// Never fails: errors are logged and the previous state is kept.
    pub fn load_data(&mut self) -> bool {
        match self.fetch_all() {
            Ok(snapshots) => {
                self.apply(snapshots);
                true
            }
            Err(e) => {
                warn!(error = %e, "waiting for data, keeping previous snapshots");
                false
            }
        }
    }

    /// Replace the snapshots wholesale and refresh the counters.
    pub fn apply(&mut self, snapshots: Snapshots) {
        self.snapshots = snapshots;
        self.update_stats();
    }

    // -- Rendering ---------------------------------------------------------

    /// Write the four stats counters. No-op without a stats snapshot.
    pub fn update_stats(&mut self) {
        let Some(stats) = &self.snapshots.stats else {
            return;
        };
        let display = StatsDisplay::from_snapshot(stats);
        for (id, text) in display.fields() {
            if !self.page.set_text(id, text) {
                debug!(id, "stats element missing");
            }
        }
    }

    pub fn render_price_chart(&mut self) -> bool {
        self.render_price_chart_at(&Local::now())
    }

    pub fn render_price_chart_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool {
        let config = charts::price_chart(self.snapshots.prices.as_ref(), now);
        self.charts.replace(&mut self.page, ChartSlot::Price, &config)
    }

    pub fn render_category_chart(&mut self) -> bool {
        let config = charts::category_chart();
        self.charts.replace(&mut self.page, ChartSlot::Category, &config)
    }

    pub fn render_trends_chart(&mut self) -> bool {
        let config = charts::trends_chart(self.snapshots.trends.as_ref());
        self.charts.replace(&mut self.page, ChartSlot::Trends, &config)
    }

    // -- Periodic refresh --------------------------------------------------

    /// One timer tick: reload, redraw the data-driven charts and stamp the
    /// update time. The category chart is static and left alone.
    pub fn refresh(&mut self) -> bool {
        self.refresh_at(&Local::now())
    }

    /// [`refresh`](Self::refresh) at an explicit instant. The stamp is
    /// written in `now`'s zone; [`last_updated`](Self::last_updated) keeps it
    /// as local time.
    pub fn refresh_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> bool
    where
        Tz::Offset: std::fmt::Display,
    {
        info!("refreshing charts");
        let committed = self.load_data();
        self.render_price_chart_at(now);
        self.render_trends_chart();
        self.page
            .set_text(config::UPDATE_TIME_ID, &format::update_time(now));
        self.last_updated = Some(now.with_timezone(&Local));
        committed
    }

    /// Hand the controller to a background thread that calls
    /// [`refresh`](Self::refresh) every `refresh_interval` until stopped.
    pub fn start_auto_refresh(self) -> Result<AutoRefresh<P>>
    where
        P: Send + 'static,
    {
        let interval = self.refresh_interval;
        AutoRefresh::spawn(self, interval)
    }

    /// Destroy every chart this controller drew.
    pub fn clear_charts(&mut self) {
        self.charts.clear(&mut self.page);
    }

    // -- Accessors ---------------------------------------------------------

    pub fn snapshots(&self) -> &Snapshots {
        &self.snapshots
    }

    pub fn charts(&self) -> &ChartSet {
        &self.charts
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}

fn join<T>(handle: ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| DashboardError::InvalidArgument("snapshot fetch thread panicked".into()))?
}
