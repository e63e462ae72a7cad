//! Utility module - shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - application error type
//! - [`logger`] - tracing setup
//! - [`time`] - timestamp helpers

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ApiResponse, AppError, AppResult};
