//! Utilities - shared helpers and types
//!
//! - [`AppError`] - application error type
//! - [`AppResponse`] - API response envelope
//! - logging, time parsing, input validation

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse};
pub use result::AppResult;
