//! Periodic write-behind of dirty accounts.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::ledger::{FlushReport, Ledger};

/// Default period between flush passes.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(10);

/// Handle to the background flush task.
///
/// The first pass runs one full period after [`FlushScheduler::spawn`]. A pass
/// that overruns the period delays the next tick instead of bunching ticks up.
pub struct FlushScheduler {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<FlushReport>,
}

impl FlushScheduler {
    /// Start flushing `ledger` every `period`.
    #[must_use]
    pub fn spawn(ledger: Arc<Ledger>, period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run(ledger, period, shutdown_rx));

        tracing::info!(period = ?period, "Flush scheduler started");
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stop the schedule and wait for one final pass.
    ///
    /// Returns the report of that final pass. Entries that still fail to
    /// persist are lost when the process exits.
    pub async fn shutdown(self) -> FlushReport {
        let _ = self.shutdown_tx.send(true);

        match self.handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!(error = %e, "Flush task join error");
                FlushReport::default()
            }
        }
    }
}

async fn run(
    ledger: Arc<Ledger>,
    period: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> FlushReport {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = flush_once(&ledger).await;
                if report.is_empty() {
                    tracing::trace!("Flush pass found nothing dirty");
                } else {
                    tracing::debug!(
                        inserted = report.inserted,
                        updated = report.updated,
                        failed = report.failed,
                        "Flush pass complete"
                    );
                }
            }
            changed = shutdown_rx.changed() => {
                // A dropped sender also means stop.
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    let report = flush_once(&ledger).await;
    if report.failed > 0 {
        tracing::error!(
            failed = report.failed,
            "Final flush left accounts unpersisted"
        );
    }
    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        "Final flush complete"
    );
    report
}

async fn flush_once(ledger: &Arc<Ledger>) -> FlushReport {
    let ledger = Arc::clone(ledger);
    match tokio::task::spawn_blocking(move || ledger.flush()).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Flush pass aborted");
            FlushReport::default()
        }
    }
}
