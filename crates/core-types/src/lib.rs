//! # Coinwatch Core Types
//!
//! The shared vocabulary of the system: the data structures every other
//! crate consumes. This is a pure data crate with no I/O and no dependencies
//! on the rest of the workspace.

pub mod structs;

// Re-export the core types to provide a clean public API.
pub use structs::{MarketSnapshot, Observation};
