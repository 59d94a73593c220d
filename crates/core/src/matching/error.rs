//! Matching error types.

use costwise_shared::types::{CostCenterId, MatchingModelId};
use thiserror::Error;

use super::types::ModelStatus;

/// Errors raised when maintaining models and rules.
///
/// Matching itself never fails; it returns `None` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchingError {
    /// Model name is empty or whitespace.
    #[error("Matching model name cannot be blank")]
    BlankName,

    /// A model must always target a cost center.
    #[error("Matching model has no target cost center")]
    MissingCostCenter,

    /// Target cost center does not exist.
    #[error("Cost center not found: {0}")]
    CostCenterNotFound(CostCenterId),

    /// Model does not exist.
    #[error("Matching model not found: {0}")]
    ModelNotFound(MatchingModelId),

    /// Attempted an invalid status transition.
    #[error("Invalid model status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ModelStatus,
        /// The attempted target status.
        to: ModelStatus,
    },

    /// Legacy rule value is empty.
    #[error("Legacy rule value cannot be blank")]
    BlankRuleValue,

    /// Unknown literal for a status or rule kind.
    #[error("Unknown value: {0}")]
    UnknownValue(String),
}
