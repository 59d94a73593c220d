//! Report data types.

use chrono::{DateTime, Utc};
use costwise_shared::types::{BudgetId, BudgetLineId, CostCenterId};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::ReportError;
use crate::budget::{BudgetLineType, BudgetStatus};
use crate::dashboard::{CostCenterSpend, Kpis, Timeframe, TrendSeries};

/// Output format of the budget report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// JSON document.
    #[default]
    Json,
    /// One CSV row per budget line.
    Csv,
}

impl ReportFormat {
    /// Parse a format from a string.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::UnknownFormat` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, ReportError> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

/// One budget line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetReportRow {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Budget status.
    pub budget_status: BudgetStatus,
    /// Budget cost center.
    pub cost_center_id: CostCenterId,
    /// Budget cost center name.
    pub cost_center_name: String,
    /// Budget line ID.
    pub line_id: BudgetLineId,
    /// Income or expense.
    pub line_type: BudgetLineType,
    /// Name of the line's matching model.
    pub matching_model_name: String,
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Achieved amount.
    pub achieved: Decimal,
    /// Achieved percentage.
    pub achieved_percent: Decimal,
    /// Income still to earn; empty for expense lines.
    pub amount_to_achieve: Option<Decimal>,
}

/// A budget listed without figures because of its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingBudget {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Status that blocks achievement.
    pub budget_status: BudgetStatus,
}

/// Budget report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetReport {
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// Trailing window of the dashboard sections.
    pub timeframe: Timeframe,
    /// Cost center filter, if any.
    pub cost_center_id: Option<CostCenterId>,
    /// Portfolio KPIs.
    pub kpis: Kpis,
    /// Achievement rows of confirmed and revised budgets.
    pub rows: Vec<BudgetReportRow>,
    /// Budgets whose status does not allow achievement.
    pub pending_budgets: Vec<PendingBudget>,
    /// Spend per cost center.
    pub cost_center_spend: Vec<CostCenterSpend>,
    /// Spending trend.
    pub spending_trend: TrendSeries,
}
