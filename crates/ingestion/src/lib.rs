//! # Coinwatch Ingestion
//!
//! The unsolicited write path: a recurring scheduler that walks the tracked
//! asset set, pulls current market data for each asset, and appends one
//! observation per successful pull to the store.
//!
//! ## Architectural Principles
//!
//! - **Partial-failure isolation:** one asset's failure never prevents
//!   attempts on the remaining assets. Every outcome, success or captured
//!   error, lands in the cycle's `IngestionReport`.
//! - **Single-flight:** at most one ingestion cycle runs at a time. A
//!   trigger that fires while a cycle is in flight is skipped and logged,
//!   never queued.
//!
//! ## Public API
//!
//! - `IngestionPipeline`: one fetch-and-persist pass across the tracked set.
//! - `Scheduler`: the long-lived background task that triggers the pipeline.
//! - `IngestionReport` / `AssetOutcome`: the per-cycle record.
//! - `IngestError`: the per-asset failure taxonomy.

// Declare the modules that constitute this crate.
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scheduler;

// Re-export the key components to create a clean, public-facing API.
pub use error::IngestError;
pub use pipeline::IngestionPipeline;
pub use report::{AssetOutcome, IngestionReport};
pub use scheduler::Scheduler;
