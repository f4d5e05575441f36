//! Cancellable periodic refresh on a dedicated thread.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use crate::controller::DashboardController;
use crate::error::{DashboardError, Result};
use crate::page::Page;

/// Handle to a running refresh loop.
///
/// The loop owns the controller while it runs. [`stop`](Self::stop) ends it
/// and returns the controller; dropping the handle also ends the loop, at
/// which point the controller is dropped on the refresh thread.
pub struct AutoRefresh<P> {
    stop_tx: Sender<()>,
    thread: JoinHandle<DashboardController<P>>,
}

impl<P: Page + Send + 'static> AutoRefresh<P> {
    pub(crate) fn spawn(mut controller: DashboardController<P>, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(DashboardError::InvalidArgument(
                "refresh interval must be non-zero".into(),
            ));
        }
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("dashboard-refresh".into())
            .spawn(move || {
                info!(interval_secs = interval.as_secs_f64(), "auto refresh started");
                // The next wait starts only after the previous refresh returned,
                // so ticks never overlap.
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            controller.refresh();
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!("auto refresh stopped");
                controller
            })?;
        Ok(Self { stop_tx, thread })
    }
}

impl<P> AutoRefresh<P> {
    /// Stop the loop, waiting for an in-flight refresh to finish.
    pub fn stop(self) -> Result<DashboardController<P>> {
        // The loop may already have exited; a closed channel is fine.
        let _ = self.stop_tx.send(());
        self.thread
            .join()
            .map_err(|_| DashboardError::InvalidArgument("refresh thread panicked".into()))
    }

    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }
}
