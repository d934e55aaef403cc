//! Error taxonomy of the ordering core.
//!
//! Only contract violations end up here. An empty playlist and tracks with
//! missing features are both legal input.

use thiserror::Error;

/// Result type for the ordering core
pub type Result<T> = std::result::Result<T, OrderError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// The wave period must be a positive integer
    #[error("Invalid period {0}: the period must be a positive number of tracks")]
    InvalidPeriod(i64),

    /// The tempo group width must be a positive integer
    #[error("Invalid tempo group width {0}: the width must be at least 1")]
    InvalidGroupWidth(usize),
}
