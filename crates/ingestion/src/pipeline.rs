use crate::error::IngestError;
use crate::report::{AssetOutcome, IngestionReport};
use chrono::Utc;
use configuration::TrackerConfig;
use core_types::Observation;
use market_client::MarketDataClient;
use observation_store::ObservationStore;
use std::sync::Arc;

/// Fetches and persists one observation per tracked asset.
pub struct IngestionPipeline {
    client: Arc<dyn MarketDataClient>,
    store: ObservationStore,
    assets: Vec<String>,
}

impl IngestionPipeline {
    pub fn new(
        client: Arc<dyn MarketDataClient>,
        store: ObservationStore,
        tracker: &TrackerConfig,
    ) -> Self {
        Self {
            client,
            store,
            assets: tracker.assets.clone(),
        }
    }

    /// One full pass across the tracked asset set, in configured order.
    ///
    /// The cycle never aborts early: a failure on one asset is captured in
    /// the report and the remaining assets are still attempted. There is no
    /// retry within a cycle; a failed asset is simply picked up again by the
    /// next one.
    pub async fn run_cycle(&self) -> IngestionReport {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(self.assets.len());

        for asset in &self.assets {
            let result = self.ingest_asset(asset).await;
            match &result {
                Ok(()) => tracing::info!(asset = %asset, "Stored observation"),
                Err(e) => tracing::warn!(asset = %asset, error = %e, "Asset skipped for this cycle"),
            }
            outcomes.push(AssetOutcome {
                asset: asset.clone(),
                result,
            });
        }

        let report = IngestionReport {
            started_at,
            outcomes,
        };
        tracing::info!(
            ok = report.succeeded(),
            failed = report.failed(),
            "Ingestion cycle complete"
        );
        report
    }

    /// Fetch, stamp with ingestion time, persist. Persistence completes (or
    /// fails and is recorded) before the next asset is attempted.
    async fn ingest_asset(&self, asset: &str) -> Result<(), IngestError> {
        let snapshot = self.client.fetch_market_data(asset).await?;
        let observation = Observation::from_snapshot(asset, &snapshot, Utc::now());
        self.store.append(&observation).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_types::MarketSnapshot;
    use market_client::ProviderError;
    use std::collections::HashSet;

    /// A scripted stand-in for the live client: configured assets fail with
    /// an upstream error, everything else answers with a fixed snapshot.
    struct ScriptedClient {
        failing: HashSet<String>,
    }

    impl ScriptedClient {
        fn failing_on(assets: &[&str]) -> Self {
            Self {
                failing: assets.iter().map(|a| a.to_string()).collect(),
            }
        }
    }

    #[async_trait]
    impl MarketDataClient for ScriptedClient {
        async fn fetch_market_data(
            &self,
            asset_id: &str,
        ) -> Result<MarketSnapshot, ProviderError> {
            if self.failing.contains(asset_id) {
                return Err(ProviderError::Status(502, "upstream down".to_string()));
            }
            Ok(MarketSnapshot {
                price: 42.0,
                market_cap: Some(1.0e9),
                change_24h: Some(-1.5),
            })
        }
    }

    fn tracker(assets: &[&str]) -> TrackerConfig {
        TrackerConfig {
            assets: assets.iter().map(|a| a.to_string()).collect(),
            interval_secs: 7200,
        }
    }

    #[tokio::test]
    async fn one_failing_asset_does_not_abort_the_cycle() {
        let store = ObservationStore::in_memory().await.unwrap();
        let pipeline = IngestionPipeline::new(
            Arc::new(ScriptedClient::failing_on(&["matic-network"])),
            store.clone(),
            &tracker(&["bitcoin", "matic-network", "ethereum"]),
        );

        let report = pipeline.run_cycle().await;

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        // Neighbors on both sides of the failure were persisted.
        assert_eq!(store.recent("bitcoin", 10).await.unwrap().len(), 1);
        assert_eq!(store.recent("ethereum", 10).await.unwrap().len(), 1);
        assert!(store.recent("matic-network", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn report_records_the_failure_against_the_right_asset() {
        let store = ObservationStore::in_memory().await.unwrap();
        let pipeline = IngestionPipeline::new(
            Arc::new(ScriptedClient::failing_on(&["matic-network"])),
            store,
            &tracker(&["bitcoin", "matic-network"]),
        );

        let report = pipeline.run_cycle().await;

        assert_eq!(report.outcomes[0].asset, "bitcoin");
        assert!(report.outcomes[0].result.is_ok());
        assert_eq!(report.outcomes[1].asset, "matic-network");
        assert!(matches!(
            report.outcomes[1].result,
            Err(IngestError::Provider(_))
        ));
    }

    #[tokio::test]
    async fn persisted_observation_carries_the_snapshot_metrics() {
        let store = ObservationStore::in_memory().await.unwrap();
        let pipeline = IngestionPipeline::new(
            Arc::new(ScriptedClient::failing_on(&[])),
            store.clone(),
            &tracker(&["bitcoin"]),
        );

        pipeline.run_cycle().await;

        let stored = store.recent("bitcoin", 1).await.unwrap();
        assert_eq!(stored[0].price, 42.0);
        assert_eq!(stored[0].market_cap, Some(1.0e9));
        assert_eq!(stored[0].change_24h, Some(-1.5));
    }

    #[tokio::test]
    async fn a_cycle_where_everything_fails_still_reports_every_asset() {
        let store = ObservationStore::in_memory().await.unwrap();
        let pipeline = IngestionPipeline::new(
            Arc::new(ScriptedClient::failing_on(&["bitcoin", "ethereum"])),
            store,
            &tracker(&["bitcoin", "ethereum"]),
        );

        let report = pipeline.run_cycle().await;

        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 2);
    }
}
