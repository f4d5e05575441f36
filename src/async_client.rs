//! Async wrapper around [`DashboardController`] for use in Tokio runtimes.
//!
//! Fetches use the blocking HTTP client, so every controller operation runs
//! on the blocking thread pool via [`tokio::task::spawn_blocking`], keeping
//! the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use tiger_dashboard::{AsyncDashboard, Dashboard, MemoryPage};
//!
//! #[tokio::main]
//! async fn main() {
//!     let builder = Dashboard::builder().base_url("http://localhost:8000/web/");
//!     let dashboard = AsyncDashboard::bootstrap(builder, MemoryPage::with_dashboard_layout())
//!         .await
//!         .unwrap();
//!
//!     let task = dashboard.spawn_auto_refresh();
//!     // ... later
//!     task.stop().await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::controller::DashboardController;
use crate::error::{DashboardError, Result};
use crate::page::Page;
use crate::DashboardBuilder;

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Shared controller whose drop happens off the async workers: the blocking
/// HTTP client inside must not be torn down on a runtime thread.
struct Shared<P: Send + 'static>(Option<Arc<Mutex<DashboardController<P>>>>);

impl<P: Send + 'static> Clone for Shared<P> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<P: Send + 'static> Shared<P> {
    fn arc(&self) -> Result<Arc<Mutex<DashboardController<P>>>> {
        self.0
            .clone()
            .ok_or_else(|| DashboardError::InvalidArgument("controller already dropped".into()))
    }
}

impl<P: Send + 'static> Drop for Shared<P> {
    fn drop(&mut self) {
        if let Some(inner) = self.0.take() {
            std::thread::spawn(move || drop(inner));
        }
    }
}

// ---------------------------------------------------------------------------
// AsyncDashboard
// ---------------------------------------------------------------------------

/// Async handle to a dashboard controller.
///
/// The controller is protected by a [`Mutex`]; each operation holds it for
/// its whole duration, so a manual refresh and a timer tick never interleave.
pub struct AsyncDashboard<P: Page + Send + 'static> {
    inner: Shared<P>,
    refresh_interval: Duration,
}

impl<P: Page + Send + 'static> AsyncDashboard<P> {
    /// Build the source, run the search widget once and initialize the
    /// controller, all on the blocking pool.
    pub async fn bootstrap(builder: DashboardBuilder, page: P) -> Result<Self> {
        let controller = tokio::task::spawn_blocking(move || {
            let dashboard = builder.build()?;
            Ok::<_, DashboardError>(dashboard.bootstrap(page))
        })
        .await
        .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))??;
        Ok(Self::from_controller(controller))
    }

    /// Wrap an already constructed controller.
    pub fn from_controller(controller: DashboardController<P>) -> Self {
        let refresh_interval = controller.refresh_interval();
        Self {
            inner: Shared(Some(Arc::new(Mutex::new(controller)))),
            refresh_interval,
        }
    }

    /// Run an operation on the controller on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut DashboardController<P>) -> T + Send + 'static,
        T: Send + 'static,
    {
        run_on(self.inner.arc()?, f).await
    }

    /// One refresh tick (see [`DashboardController::refresh`]).
    pub async fn refresh(&self) -> Result<bool> {
        self.run(DashboardController::refresh).await
    }

    /// One load attempt without redrawing charts.
    pub async fn load_data(&self) -> Result<bool> {
        self.run(DashboardController::load_data).await
    }

    /// Start the periodic refresh on the current runtime.
    ///
    /// The first tick fires one interval from now. A tick that is late
    /// because the previous refresh stalled is delayed, not doubled up.
    pub fn spawn_auto_refresh(&self) -> RefreshTask {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let shared = self.inner.clone();
        let period = self.refresh_interval;

        let join = tokio::spawn(async move {
            info!(interval_secs = period.as_secs_f64(), "auto refresh started");
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut cancel_rx => break,
                    _ = ticker.tick() => {
                        let tick = match shared.arc() {
                            Ok(inner) => run_on(inner, DashboardController::refresh).await,
                            Err(e) => Err(e),
                        };
                        if let Err(e) = tick {
                            warn!(error = %e, "refresh tick failed");
                        }
                    }
                }
            }
            info!("auto refresh stopped");
        });

        RefreshTask { cancel_tx, join }
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }
}

async fn run_on<P, F, T>(inner: Arc<Mutex<DashboardController<P>>>, f: F) -> Result<T>
where
    P: Page + Send + 'static,
    F: FnOnce(&mut DashboardController<P>) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = inner
            .lock()
            .map_err(|_| DashboardError::InvalidArgument("controller lock poisoned".into()))?;
        Ok(f(&mut *guard))
    })
    .await
    .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))?
}

// ---------------------------------------------------------------------------
// RefreshTask
// ---------------------------------------------------------------------------

/// Handle to a running async refresh loop.
pub struct RefreshTask {
    cancel_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl RefreshTask {
    /// Cancel the loop and wait for it to finish any in-flight tick.
    pub async fn stop(self) -> Result<()> {
        // Already finished if the receiver is gone.
        let _ = self.cancel_tx.send(());
        self.join
            .await
            .map_err(|e| DashboardError::InvalidArgument(format!("Task join error: {e}")))
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
