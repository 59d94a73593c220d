//! Dashboard error types.

use thiserror::Error;

/// Errors raised when parsing dashboard queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    /// Timeframe is not week, month, or year.
    #[error("Unknown timeframe: {0}")]
    UnknownTimeframe(String),

    /// Trend metric is not spending or transaction volume.
    #[error("Unknown trend metric: {0}")]
    UnknownMetric(String),
}
