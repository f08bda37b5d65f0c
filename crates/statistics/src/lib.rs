//! # Coinwatch Statistics Engine
//!
//! Descriptive statistics over a bounded, most-recent window of an asset's
//! stored price history.
//!
//! ## Architectural Principles
//!
//! - **Read-and-compute:** The engine reads a window from the observation
//!   store and computes over it. It has no side effects and writes nothing.
//! - **Separated math:** The numeric helpers are pure functions over plain
//!   slices, which keeps them trivially testable apart from the I/O path.
//!
//! ## Public API
//!
//! - `StatsEngine`: the main struct that contains the computation logic.
//! - `StatsError`: the specific error types that can be returned from this
//!   crate.
//! - `DEFAULT_DEVIATION_WINDOW`: the window size used when no override is
//!   configured.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{StatsEngine, DEFAULT_DEVIATION_WINDOW};
pub use error::StatsError;
