//! # Coinwatch Observation Store
//!
//! A high-level, application-specific interface to the observation log: the
//! system's append-only archive of price samples.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic and
//!   exposes an abstract two-operation contract (`append`, `recent`) to the
//!   rest of the application, hiding the underlying SQL.
//! - **Append-only:** Observations are immutable once written. There are no
//!   update or delete paths, by design.
//! - **Asynchronous & Pooled:** All operations are asynchronous and run over
//!   a shared connection pool.
//!
//! ## Public API
//!
//! - `connect` / `connect_with_url`: establish the database connection pool.
//! - `ObservationStore`: the repository holding the pool and providing the
//!   data access methods.
//! - `StoreError`: the specific error types that can be returned from this
//!   crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_with_url};
pub use error::StoreError;
pub use repository::ObservationStore;
