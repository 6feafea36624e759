//! Data models
//!
//! Row-backed entities carry `id: Option<i64>`: `None` until the store
//! assigns a primary key on first save (SQLite INTEGER PRIMARY KEY).

pub mod customer;
pub mod reservation;

// Re-exports
pub use customer::*;
pub use reservation::*;
