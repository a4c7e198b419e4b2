//! Runs the aggregator on a fixed schedule

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::aggregator::DigestAggregator;

/// Triggers one aggregator invocation per tick until shutdown
pub struct DigestScheduler {
    aggregator: Arc<DigestAggregator>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl DigestScheduler {
    #[must_use]
    pub const fn new(
        aggregator: Arc<DigestAggregator>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            aggregator,
            interval,
            shutdown,
        }
    }

    /// Runs invocations until the shutdown token is cancelled.
    ///
    /// The first invocation starts immediately. A failed invocation is
    /// logged and the next tick proceeds; an in-flight invocation always
    /// completes before shutdown is observed.
    pub async fn start(self) {
        info!("Starting DigestScheduler with a {}s interval", self.interval.as_secs());

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                () = self.shutdown.cancelled() => {
                    info!("Scheduler shutting down");
                    break;
                }
            }

            match self.aggregator.run_once().await {
                Ok(outcome) => info!(?outcome, "Digest invocation complete"),
                Err(e) => {
                    let upstream = e.is_upstream_error();
                    error!(error = ?e, upstream, "Digest invocation failed");
                }
            }
        }

        info!("DigestScheduler shutdown complete");
    }
}
