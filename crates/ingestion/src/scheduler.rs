use crate::pipeline::IngestionPipeline;
use configuration::TrackerConfig;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{interval, Duration, MissedTickBehavior};

/// Triggers ingestion cycles on a fixed recurrence for the life of the
/// process.
///
/// At most one cycle runs at a time. The single execution slot is
/// checked-and-taken before a cycle starts and released when it ends,
/// including on failure paths; a trigger that fires while the slot is taken
/// is skipped and logged, never queued. In-flight cycles are not cancellable.
pub struct Scheduler {
    pipeline: Arc<IngestionPipeline>,
    period: Duration,
    slot: Arc<Semaphore>,
}

impl Scheduler {
    pub fn new(pipeline: Arc<IngestionPipeline>, tracker: &TrackerConfig) -> Self {
        Self {
            pipeline,
            period: Duration::from_secs(tracker.interval_secs),
            slot: Arc::new(Semaphore::new(1)),
        }
    }

    /// Runs until the process exits. Spawn this on its own task.
    pub async fn run(self) {
        tracing::info!(period_secs = self.period.as_secs(), "Scheduler started");

        let mut timer = interval(self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            timer.tick().await;
            self.trigger();
        }
    }

    /// Fires one trigger: starts a cycle if the execution slot is free,
    /// otherwise skips. Returns whether a cycle was started.
    fn trigger(&self) -> bool {
        match self.slot.clone().try_acquire_owned() {
            Ok(permit) => {
                let pipeline = self.pipeline.clone();
                tokio::spawn(async move {
                    // Permit is dropped when the cycle ends, on every path.
                    let _permit = permit;
                    tracing::info!("Fetching market data for tracked assets...");
                    pipeline.run_cycle().await;
                });
                true
            }
            Err(_) => {
                tracing::warn!("Previous ingestion cycle still in flight; skipping this trigger");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_types::MarketSnapshot;
    use market_client::{MarketDataClient, ProviderError};
    use observation_store::ObservationStore;

    /// Holds every fetch open long enough for a second trigger to observe
    /// the in-flight cycle.
    struct SlowClient {
        delay: Duration,
        fail: bool,
    }

    #[async_trait]
    impl MarketDataClient for SlowClient {
        async fn fetch_market_data(
            &self,
            _asset_id: &str,
        ) -> Result<MarketSnapshot, ProviderError> {
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(ProviderError::Status(502, "upstream down".to_string()));
            }
            Ok(MarketSnapshot {
                price: 1.0,
                market_cap: None,
                change_24h: None,
            })
        }
    }

    async fn scheduler_with(delay: Duration, fail: bool) -> Scheduler {
        let store = ObservationStore::in_memory().await.unwrap();
        let tracker = TrackerConfig {
            assets: vec!["bitcoin".to_string()],
            interval_secs: 7200,
        };
        let pipeline = Arc::new(IngestionPipeline::new(
            Arc::new(SlowClient { delay, fail }),
            store,
            &tracker,
        ));
        Scheduler::new(pipeline, &tracker)
    }

    #[tokio::test]
    async fn overlapping_trigger_is_skipped_not_queued() {
        let scheduler = scheduler_with(Duration::from_millis(200), false).await;

        assert!(scheduler.trigger());
        // The first cycle is still sleeping inside its fetch.
        assert!(!scheduler.trigger());

        // Once the cycle finishes, the slot frees up again.
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(scheduler.trigger());
    }

    #[tokio::test]
    async fn slot_is_released_even_when_the_cycle_fails() {
        let scheduler = scheduler_with(Duration::from_millis(50), true).await;

        assert!(scheduler.trigger());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(scheduler.trigger());
    }
}
