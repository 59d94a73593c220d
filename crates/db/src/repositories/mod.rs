//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Pure rules live in `costwise-core`; repositories load what those rules need,
//! call them, and persist the result.

pub mod budget;
pub mod document;
pub mod error;
pub mod matching;
pub mod reference;
pub mod report;

pub use budget::BudgetRepository;
pub use document::{DocumentDetails, DocumentRepository};
pub use error::RepositoryError;
pub use matching::{BestMatch, CreateLegacyRuleInput, MatchingRepository};
pub use reference::{CreateProductInput, ReferenceRepository};
pub use report::ReportRepository;
