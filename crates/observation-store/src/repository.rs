use crate::error::StoreError;
use chrono::{TimeZone, Utc};
use core_types::Observation;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;

/// The `ObservationStore` provides a high-level interface to the observation
/// log. It supports exactly two operations, append and ordered read, and
/// persisted rows are never updated or deleted.
#[derive(Debug, Clone)]
pub struct ObservationStore {
    pool: SqlitePool,
}

/// Row shape of the `observations` table. `observed_at` is persisted as unix
/// epoch milliseconds so recency ordering is integral, not textual.
#[derive(Debug, Clone, FromRow)]
struct ObservationRow {
    asset: String,
    price: f64,
    market_cap: Option<f64>,
    change_24h: Option<f64>,
    observed_at: i64,
}

impl ObservationRow {
    fn into_observation(self) -> Result<Observation, StoreError> {
        let observed_at = Utc
            .timestamp_millis_opt(self.observed_at)
            .single()
            .ok_or_else(|| {
                StoreError::InvalidRow(format!(
                    "observed_at {} is not a valid timestamp",
                    self.observed_at
                ))
            })?;

        Ok(Observation {
            asset: self.asset,
            price: self.price,
            market_cap: self.market_cap,
            change_24h: self.change_24h,
            observed_at,
        })
    }
}

impl ObservationStore {
    /// Creates a new `ObservationStore` over a shared connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// An ephemeral single-connection store backed by an in-memory database,
    /// with the schema already applied. Used by tests and local experiments.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // One connection only: every pooled connection would otherwise get
        // its own private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Creates the observations table and its recency index if they do not
    /// exist yet. Safe to call on every startup.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS observations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asset TEXT NOT NULL,
                price REAL NOT NULL,
                market_cap REAL,
                change_24h REAL,
                observed_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Index for the asset + recency lookups on the query path.
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_observations_asset_time
            ON observations (asset, observed_at);
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Durably persists one observation.
    pub async fn append(&self, observation: &Observation) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO observations (asset, price, market_cap, change_24h, observed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&observation.asset)
        .bind(observation.price)
        .bind(observation.market_cap)
        .bind(observation.change_24h)
        .bind(observation.observed_at.timestamp_millis())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the most recent `limit` observations for `asset`, ordered
    /// newest to oldest, truncated to fewer if fewer exist.
    ///
    /// The ordering key is `observed_at` descending; ties are broken by
    /// insertion order (most recently inserted first) so the window stays
    /// deterministic.
    pub async fn recent(&self, asset: &str, limit: usize) -> Result<Vec<Observation>, StoreError> {
        let rows = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT asset, price, market_cap, change_24h, observed_at
            FROM observations
            WHERE asset = ?1
            ORDER BY observed_at DESC, id DESC
            LIMIT ?2
            "#,
        )
        .bind(asset)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(ObservationRow::into_observation)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn obs(asset: &str, price: f64, millis: i64) -> Observation {
        Observation {
            asset: asset.to_string(),
            price,
            market_cap: Some(1.0e9),
            change_24h: Some(0.5),
            observed_at: DateTime::from_timestamp_millis(millis).unwrap(),
        }
    }

    #[tokio::test]
    async fn append_then_recent_round_trips_all_fields() {
        let store = ObservationStore::in_memory().await.unwrap();

        let written = Observation {
            asset: "bitcoin".to_string(),
            price: 64250.5,
            market_cap: None,
            change_24h: Some(-2.41),
            observed_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        };
        store.append(&written).await.unwrap();

        let read = store.recent("bitcoin", 10).await.unwrap();
        assert_eq!(read, vec![written]);
    }

    #[tokio::test]
    async fn recent_orders_newest_first() {
        let store = ObservationStore::in_memory().await.unwrap();
        store.append(&obs("bitcoin", 100.0, 1_000)).await.unwrap();
        store.append(&obs("bitcoin", 200.0, 3_000)).await.unwrap();
        store.append(&obs("bitcoin", 150.0, 2_000)).await.unwrap();

        let prices: Vec<f64> = store
            .recent("bitcoin", 10)
            .await
            .unwrap()
            .iter()
            .map(|o| o.price)
            .collect();
        assert_eq!(prices, vec![200.0, 150.0, 100.0]);
    }

    #[tokio::test]
    async fn recent_breaks_timestamp_ties_by_insertion_order() {
        let store = ObservationStore::in_memory().await.unwrap();
        // Identical observed_at for all three; insertion order must decide.
        store.append(&obs("bitcoin", 10.0, 5_000)).await.unwrap();
        store.append(&obs("bitcoin", 20.0, 5_000)).await.unwrap();
        store.append(&obs("bitcoin", 30.0, 5_000)).await.unwrap();

        let prices: Vec<f64> = store
            .recent("bitcoin", 10)
            .await
            .unwrap()
            .iter()
            .map(|o| o.price)
            .collect();
        assert_eq!(prices, vec![30.0, 20.0, 10.0]);
    }

    #[tokio::test]
    async fn recent_truncates_to_the_requested_limit() {
        let store = ObservationStore::in_memory().await.unwrap();
        for i in 0..5 {
            store
                .append(&obs("bitcoin", i as f64, 1_000 * (i + 1)))
                .await
                .unwrap();
        }

        let window = store.recent("bitcoin", 2).await.unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].price, 4.0);
        assert_eq!(window[1].price, 3.0);
    }

    #[tokio::test]
    async fn recent_is_empty_for_an_unknown_asset() {
        let store = ObservationStore::in_memory().await.unwrap();
        store.append(&obs("bitcoin", 100.0, 1_000)).await.unwrap();

        let window = store.recent("ethereum", 10).await.unwrap();
        assert!(window.is_empty());
    }

    #[tokio::test]
    async fn histories_of_different_assets_stay_separate() {
        let store = ObservationStore::in_memory().await.unwrap();
        store.append(&obs("bitcoin", 100.0, 1_000)).await.unwrap();
        store.append(&obs("ethereum", 4.0, 2_000)).await.unwrap();

        let bitcoin = store.recent("bitcoin", 10).await.unwrap();
        assert_eq!(bitcoin.len(), 1);
        assert_eq!(bitcoin[0].price, 100.0);
    }
}
