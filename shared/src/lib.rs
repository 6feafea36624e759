//! Shared types for Lunchly
//!
//! Plain data objects passed between the record managers and the
//! presentation layer. Nothing in this crate performs I/O.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
