//! Dashboard data types.

use chrono::NaiveDate;
use costwise_shared::types::{BudgetId, BudgetLineId, CostCenterId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DashboardError;

/// Trailing reporting window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// Last 7 days.
    Week,
    /// Last 30 days.
    #[default]
    Month,
    /// Last 365 days.
    Year,
}

impl Timeframe {
    /// Parse a timeframe from a string.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::UnknownTimeframe` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, DashboardError> {
        match s.to_lowercase().as_str() {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DashboardError::UnknownTimeframe(s.to_string())),
        }
    }

    /// Returns the string representation of the timeframe.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Window length in days.
    #[must_use]
    pub const fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget health derived from utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Utilization at most 70%.
    Healthy,
    /// Utilization above 70% and at most 90%.
    Warning,
    /// Utilization above 90%.
    Critical,
}

impl HealthStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Portfolio key figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    /// Window the spend was taken from.
    pub timeframe: Timeframe,
    /// Sum of confirmed budgets covering today.
    pub total_budget: Decimal,
    /// Posted purchase spend in the window.
    pub total_actual: Decimal,
    /// `total_budget - total_actual`; may be negative.
    pub remaining: Decimal,
    /// `total_actual / total_budget * 100`, one place.
    pub utilization: Decimal,
    /// Health of `utilization`.
    pub health_status: HealthStatus,
}

/// What a trend series measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Sum of document totals.
    Spending,
    /// Number of documents.
    TransactionVolume,
}

impl TrendMetric {
    /// Parse a metric from a string.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::UnknownMetric` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, DashboardError> {
        match s.to_lowercase().as_str() {
            "spending" => Ok(Self::Spending),
            "transaction_volume" | "volume" => Ok(Self::TransactionVolume),
            _ => Err(DashboardError::UnknownMetric(s.to_string())),
        }
    }
}

/// A date bucket of a trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Display label.
    pub label: String,
    /// First day of the bucket.
    pub start: NaiveDate,
    /// Last day of the bucket (inclusive).
    pub end: NaiveDate,
    /// Sum or count for the bucket.
    pub value: Decimal,
}

/// A bucketed series, oldest bucket first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// What is measured.
    pub metric: TrendMetric,
    /// Bucketing scheme.
    pub timeframe: Timeframe,
    /// Buckets, oldest first.
    pub points: Vec<TrendPoint>,
}

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Needs attention.
    Warning,
    /// Needs action.
    Critical,
}

/// What raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// A budget's cost center spend is high.
    BudgetUtilization,
    /// An expense line achieved more than budgeted.
    LineOverBudget,
    /// Overall utilization is high.
    PortfolioHealth,
}

/// A dashboard alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Alert source.
    pub kind: AlertKind,
    /// Severity.
    pub severity: AlertSeverity,
    /// Human-readable message.
    pub message: String,
    /// Budget concerned, if any.
    pub budget_id: Option<BudgetId>,
    /// Budget line concerned, if any.
    pub budget_line_id: Option<BudgetLineId>,
    /// Cost center concerned, if any.
    pub cost_center_id: Option<CostCenterId>,
    /// Utilization or achieved percent that triggered the alert.
    pub percent: Decimal,
}

/// Spend of one cost center in the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterSpend {
    /// Cost center; `None` groups unassigned documents.
    pub cost_center_id: Option<CostCenterId>,
    /// Cost center name.
    pub cost_center_name: String,
    /// Posted purchase spend.
    pub amount: Decimal,
    /// Share of total spend, one place.
    pub share_percent: Decimal,
}
