//! Budget error types.

use chrono::NaiveDate;
use costwise_shared::types::BudgetId;
use thiserror::Error;

use super::types::BudgetStatus;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(BudgetId),

    /// Budget name is empty or whitespace.
    #[error("Budget name cannot be blank")]
    BlankName,

    /// Amount cannot be negative.
    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// Window starts after it ends.
    #[error("Budget window starts on {start} but ends on {end}")]
    InvalidPeriod {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Attempted an invalid status transition.
    #[error("Invalid budget status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: BudgetStatus,
        /// The attempted target status.
        to: BudgetStatus,
    },

    /// Only confirmed budgets can be revised.
    #[error("Only a confirmed budget can be revised, budget is {0}")]
    NotRevisable(BudgetStatus),

    /// Lines can only change while draft or active.
    #[error("Budget lines cannot change while the budget is {0}")]
    LinesLocked(BudgetStatus),

    /// Another request revised the budget first.
    #[error("Budget {0} was revised concurrently")]
    RevisionConflict(BudgetId),

    /// `revised_from_id` links loop back on themselves.
    #[error("Revision chain of budget {0} is cyclic")]
    RevisionCycle(BudgetId),

    /// Unknown literal for a status or line type.
    #[error("Unknown value: {0}")]
    UnknownValue(String),
}
