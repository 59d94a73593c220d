//! Budget data types.

use chrono::{DateTime, NaiveDate, Utc};
use costwise_shared::types::{BudgetId, BudgetLineId, CostCenterId, MatchingModelId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// Budget lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Being prepared; lines may change.
    Draft,
    /// Under review; lines may still change.
    Active,
    /// Approved; achievement is tracked.
    Confirmed,
    /// Superseded by a revision; achievement is still reported.
    Revised,
    /// Abandoned.
    Cancelled,
}

impl BudgetStatus {
    /// Parse a status from a string.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::UnknownValue` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, BudgetError> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "confirmed" => Ok(Self::Confirmed),
            "revised" => Ok(Self::Revised),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(BudgetError::UnknownValue(s.to_string())),
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Confirmed => "confirmed",
            Self::Revised => "revised",
            Self::Cancelled => "cancelled",
        }
    }

    /// Achievement is only reported for confirmed and revised budgets.
    #[must_use]
    pub const fn is_achievement_computable(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Revised)
    }

    /// Lines can be added while the budget is draft or active.
    #[must_use]
    pub const fn accepts_lines(&self) -> bool {
        matches!(self, Self::Draft | Self::Active)
    }

    /// Validates a status-only transition and returns the new status.
    ///
    /// `revised` is never reachable here; it is set by a revision.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTransition` for anything not allowed.
    pub fn transition_to(self, to: Self) -> Result<Self, BudgetError> {
        match (self, to) {
            (Self::Draft, Self::Active | Self::Confirmed)
            | (Self::Active, Self::Confirmed)
            | (Self::Draft | Self::Active | Self::Confirmed, Self::Cancelled) => Ok(to),
            _ => Err(BudgetError::InvalidTransition { from: self, to }),
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a budget line tracks earnings or spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetLineType {
    /// Achieved by posted customer invoices.
    Income,
    /// Achieved by posted vendor bills.
    Expense,
}

impl BudgetLineType {
    /// Parse a line type from a string.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::UnknownValue` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, BudgetError> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(BudgetError::UnknownValue(s.to_string())),
        }
    }

    /// Returns the string representation of the line type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day.
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidPeriod` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, BudgetError> {
        if start > end {
            return Err(BudgetError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` is within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A budget for one cost center over a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Budget name.
    pub name: String,
    /// Owning cost center.
    pub cost_center_id: CostCenterId,
    /// Total budgeted amount.
    pub amount: Decimal,
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive).
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: BudgetStatus,
    /// Budget this one revises.
    pub revised_from_id: Option<BudgetId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a budget.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    /// Budget name.
    pub name: String,
    /// Owning cost center.
    pub cost_center_id: CostCenterId,
    /// Total amount.
    pub amount: Decimal,
    /// First day of the window.
    pub start_date: NaiveDate,
    /// Last day of the window (inclusive).
    pub end_date: NaiveDate,
}

impl Budget {
    /// Creates a draft budget.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank name, a negative amount, or an inverted window.
    pub fn new(input: NewBudget, now: DateTime<Utc>) -> Result<Self, BudgetError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(BudgetError::BlankName);
        }
        if input.amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }
        let period = DateRange::new(input.start_date, input.end_date)?;

        Ok(Self {
            id: BudgetId::new(),
            name: name.to_string(),
            cost_center_id: input.cost_center_id,
            amount: input.amount,
            start_date: period.start,
            end_date: period.end,
            status: BudgetStatus::Draft,
            revised_from_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// The budget window.
    #[must_use]
    pub const fn period(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns true if `date` falls inside the budget window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.period().contains(date)
    }
}

/// A budgeted amount tied to a matching model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Line ID.
    pub id: BudgetLineId,
    /// Parent budget.
    pub budget_id: BudgetId,
    /// Model whose cost center is measured.
    pub matching_model_id: MatchingModelId,
    /// Income or expense.
    pub line_type: BudgetLineType,
    /// Budgeted amount.
    pub budgeted_amount: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for adding a budget line.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudgetLine {
    /// Model whose cost center is measured.
    pub matching_model_id: MatchingModelId,
    /// Income or expense.
    pub line_type: BudgetLineType,
    /// Budgeted amount.
    pub budgeted_amount: Decimal,
}

impl BudgetLine {
    /// Creates a line for an editable budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::LinesLocked` if the budget no longer accepts
    /// lines, or `BudgetError::NegativeAmount`.
    pub fn new(
        budget: &Budget,
        input: NewBudgetLine,
        now: DateTime<Utc>,
    ) -> Result<Self, BudgetError> {
        if !budget.status.accepts_lines() {
            return Err(BudgetError::LinesLocked(budget.status));
        }
        if input.budgeted_amount < Decimal::ZERO {
            return Err(BudgetError::NegativeAmount);
        }

        Ok(Self {
            id: BudgetLineId::new(),
            budget_id: budget.id,
            matching_model_id: input.matching_model_id,
            line_type: input.line_type,
            budgeted_amount: input.budgeted_amount,
            created_at: now,
        })
    }
}
