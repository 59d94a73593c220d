//! Commercial documents and posting.
//!
//! # Modules
//!
//! - `types` - Documents, lines, statuses, and transaction records
//! - `error` - Document-specific error types
//! - `posting` - Line assignment and sales-order invoicing

pub mod error;
pub mod posting;
pub mod types;

pub use error::PostingError;
pub use posting::{PostedDocument, PostingContext, PostingPlan, PostingService};
pub use types::{
    Document, DocumentLine, DocumentStatus, DocumentType, NewDocument, NewDocumentLine,
    TransactionRecord,
};
