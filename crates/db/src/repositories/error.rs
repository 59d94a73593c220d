//! Repository error type and its mapping to `AppError`.

use costwise_core::budget::BudgetError;
use costwise_core::documents::PostingError;
use costwise_core::matching::MatchingError;
use costwise_core::reference::ReferenceError;
use costwise_shared::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Errors returned by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reference data validation failed.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// Matching model or rule error.
    #[error(transparent)]
    Matching(#[from] MatchingError),

    /// Budget error.
    #[error(transparent)]
    Budget(#[from] BudgetError),

    /// Document or posting error.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    Missing {
        /// Entity kind.
        entity: &'static str,
        /// Requested ID.
        id: String,
    },

    /// Another writer changed the record first.
    #[error("Concurrent update: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl RepositoryError {
    /// A missing record of the given kind.
    pub fn missing(entity: &'static str, id: impl ToString) -> Self {
        Self::Missing {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        match err {
            RepositoryError::Reference(_) => Self::Validation(message),
            RepositoryError::Matching(e) => match e {
                MatchingError::ModelNotFound(_) => Self::NotFound(message),
                MatchingError::MissingCostCenter | MatchingError::CostCenterNotFound(_) => {
                    Self::IntegrityViolation(message)
                }
                MatchingError::InvalidTransition { .. } => Self::InvalidState(message),
                MatchingError::BlankName
                | MatchingError::BlankRuleValue
                | MatchingError::UnknownValue(_) => Self::Validation(message),
            },
            RepositoryError::Budget(e) => match e {
                BudgetError::NotFound(_) => Self::NotFound(message),
                BudgetError::InvalidTransition { .. }
                | BudgetError::NotRevisable(_)
                | BudgetError::LinesLocked(_) => Self::InvalidState(message),
                BudgetError::RevisionConflict(_) => Self::Conflict(message),
                BudgetError::RevisionCycle(_) => Self::IntegrityViolation(message),
                BudgetError::BlankName
                | BudgetError::NegativeAmount
                | BudgetError::InvalidPeriod { .. }
                | BudgetError::UnknownValue(_) => Self::Validation(message),
            },
            RepositoryError::Posting(e) => match e {
                PostingError::NotFound(_) => Self::NotFound(message),
                PostingError::InvalidTransition { .. } => Self::InvalidState(message),
                PostingError::AlreadyPosted(_) => Self::Conflict(message),
                PostingError::EmptyDocument
                | PostingError::NonPositiveQuantity
                | PostingError::NegativePrice
                | PostingError::PendingVendorNotAllowed(_)
                | PostingError::UnknownValue(_) => Self::Validation(message),
            },
            RepositoryError::Missing { .. } => Self::IntegrityViolation(message),
            RepositoryError::Conflict(_) => Self::Conflict(message),
            RepositoryError::Database(_) => Self::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costwise_core::budget::BudgetStatus;
    use costwise_shared::types::{BudgetId, DocumentId};

    #[test]
    fn test_error_mapping() {
        let id = BudgetId::new();
        assert!(matches!(
            AppError::from(RepositoryError::from(BudgetError::NotFound(id))),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::from(BudgetError::RevisionConflict(id))),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::from(BudgetError::NotRevisable(
                BudgetStatus::Draft
            ))),
            AppError::InvalidState(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::from(MatchingError::MissingCostCenter)),
            AppError::IntegrityViolation(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::from(PostingError::AlreadyPosted(
                DocumentId::new()
            ))),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::missing("Product", "x")),
            AppError::IntegrityViolation(_)
        ));
        assert!(matches!(
            AppError::from(RepositoryError::from(DbErr::Custom("boom".into()))),
            AppError::Database(_)
        ));
    }
}
