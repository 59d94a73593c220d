//! Document and posting error types.

use costwise_shared::types::DocumentId;
use thiserror::Error;

use super::types::{DocumentStatus, DocumentType};

/// Errors raised when creating or posting documents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PostingError {
    /// Document does not exist.
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// A document needs at least one line.
    #[error("Document has no lines")]
    EmptyDocument,

    /// Quantity must be positive.
    #[error("Line quantity must be positive")]
    NonPositiveQuantity,

    /// Unit price cannot be negative.
    #[error("Line unit price cannot be negative")]
    NegativePrice,

    /// Only purchase documents can wait on a vendor.
    #[error("{0} documents cannot wait on a vendor")]
    PendingVendorNotAllowed(DocumentType),

    /// Attempted an invalid status transition.
    #[error("Invalid document status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: DocumentStatus,
        /// The attempted target status.
        to: DocumentStatus,
    },

    /// Document was posted concurrently.
    #[error("Document {0} was already posted")]
    AlreadyPosted(DocumentId),

    /// Unknown literal for a document type or status.
    #[error("Unknown value: {0}")]
    UnknownValue(String),
}
