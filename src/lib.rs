//! Tiger dashboard engine.
//!
//! Polls periodically regenerated JSON snapshots (stats counters, price
//! histories, search trend counts, the recent-searches log) and turns them
//! into counter text and declarative chart configs written to a [`Page`].
//!
//! # Quick start
//!
//! ```no_run
//! use tiger_dashboard::{Dashboard, MemoryPage};
//!
//! let dashboard = Dashboard::builder()
//!     .base_url("http://localhost:8000/web/")
//!     .build()
//!     .unwrap();
//!
//! // Widget runs once, controller draws everything.
//! let controller = dashboard.bootstrap(MemoryPage::with_dashboard_layout());
//!
//! // Redraw every five minutes until stopped.
//! let refresher = controller.start_auto_refresh().unwrap();
//! let controller = refresher.stop().unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod charts;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod models;
pub mod page;
pub mod queries;
pub mod refresh;
pub mod source;
pub mod widget;

#[cfg(feature = "async")]
pub use async_client::{AsyncDashboard, RefreshTask};
pub use charts::{ChartSet, ChartSlot};
pub use controller::{DashboardController, Snapshots};
pub use error::{DashboardError, Result};
pub use page::{render_html, ChartHandle, MemoryPage, Page};
pub use refresh::AutoRefresh;
pub use source::{Location, SnapshotSource};
pub use widget::{SearchHistoryWidget, SearchSummary};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// DashboardBuilder
// ---------------------------------------------------------------------------

enum PendingLocation {
    Url(String),
    Dir { page_dir: PathBuf, site_root: PathBuf },
}

/// Builder for configuring and constructing a [`Dashboard`].
///
/// Use [`Dashboard::builder()`] to obtain a builder, set where the page lives,
/// and call [`build()`](DashboardBuilder::build).
pub struct DashboardBuilder {
    location: Option<PendingLocation>,
    timeout: Duration,
    refresh_interval: Duration,
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self {
            location: None,
            timeout: config::DEFAULT_TIMEOUT,
            refresh_interval: config::REFRESH_INTERVAL,
        }
    }
}

impl DashboardBuilder {
    /// Serve snapshots over HTTP. `url` is the dashboard page's location;
    /// page-relative resources resolve against it.
    pub fn base_url(mut self, url: &str) -> Self {
        self.location = Some(PendingLocation::Url(url.to_string()));
        self
    }

    /// Read snapshots from disk. `page_dir` plays the page's directory and
    /// `site_root` the server root for `/`-prefixed resources.
    pub fn local_dir<P: AsRef<Path>, R: AsRef<Path>>(mut self, page_dir: P, site_root: R) -> Self {
        self.location = Some(PendingLocation::Dir {
            page_dir: page_dir.as_ref().to_path_buf(),
            site_root: site_root.as_ref().to_path_buf(),
        });
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Auto-refresh period. Defaults to 5 minutes.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Validate the settings and build the HTTP client.
    pub fn build(self) -> Result<Dashboard> {
        let location = match self.location {
            Some(PendingLocation::Url(url)) => Location::url(&url)?,
            Some(PendingLocation::Dir {
                page_dir,
                site_root,
            }) => Location::dir(page_dir, site_root),
            None => {
                return Err(DashboardError::InvalidArgument(
                    "a base URL or local directory is required".into(),
                ))
            }
        };
        if self.timeout.is_zero() {
            return Err(DashboardError::InvalidArgument(
                "HTTP timeout must be non-zero".into(),
            ));
        }
        if self.refresh_interval.is_zero() {
            return Err(DashboardError::InvalidArgument(
                "refresh interval must be non-zero".into(),
            ));
        }
        let source = SnapshotSource::new(location, self.timeout)?;
        Ok(Dashboard {
            source: Arc::new(source),
            refresh_interval: self.refresh_interval,
        })
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Entry point: a configured snapshot source from which the controller and
/// the search widget are created.
pub struct Dashboard {
    source: Arc<SnapshotSource>,
    refresh_interval: Duration,
}

impl Dashboard {
    /// Create a new builder.
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    /// A controller drawing into `page`. Nothing is fetched yet.
    pub fn controller<P: Page>(&self, page: P) -> DashboardController<P> {
        DashboardController::new(Arc::clone(&self.source), page, self.refresh_interval)
    }

    /// The one-shot search history widget, sharing this dashboard's source.
    pub fn widget(&self) -> SearchHistoryWidget {
        SearchHistoryWidget::new(Arc::clone(&self.source))
    }

    /// Page-load routine: run the search widget once, then initialize the
    /// controller. The returned controller is the page's only instance.
    pub fn bootstrap<P: Page>(&self, mut page: P) -> DashboardController<P> {
        self.widget().load_search_history(&mut page);
        let mut controller = self.controller(page);
        controller.init();
        controller
    }

    /// The snapshot source every fetch goes through.
    pub fn source(&self) -> &SnapshotSource {
        &self.source
    }

    /// Auto-refresh period handed to every controller.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = match &self.source.location {
            Location::Url(url) => url.to_string(),
            Location::Dir { page_dir, .. } => page_dir.display().to_string(),
        };
        write!(
            f,
            "Dashboard(location={}, refresh_interval={}s)",
            location,
            self.refresh_interval.as_secs()
        )
    }
}
