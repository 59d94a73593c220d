//! Reference data validation errors.

use thiserror::Error;

/// Errors raised when building reference records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceError {
    /// Name is empty or whitespace.
    #[error("{entity} name cannot be blank")]
    BlankName {
        /// Entity kind.
        entity: &'static str,
    },

    /// Price cannot be negative.
    #[error("Product price cannot be negative")]
    NegativePrice,

    /// Unknown contact type literal.
    #[error("Unknown contact type: {0}")]
    UnknownContactType(String),
}
