//! Budget ledger and achievement tracking.
//!
//! # Modules
//!
//! - `types` - Budgets, lines, and their statuses
//! - `error` - Budget-specific error types
//! - `service` - Lifecycle transitions, revision, and budget selection
//! - `achievement` - Posted documents measured against budget lines

pub mod achievement;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use achievement::{AchievementOutcome, AchievementService, BudgetAchievement, LineAchievement};
pub use error::BudgetError;
pub use service::{BudgetService, Revision};
pub use types::{
    Budget, BudgetLine, BudgetLineType, BudgetStatus, DateRange, NewBudget, NewBudgetLine,
};
