//! Report generation service.

use std::io::Write;

use chrono::{DateTime, Utc};
use costwise_shared::types::CostCenterId;

use super::error::ReportError;
use super::types::{BudgetReport, BudgetReportRow, PendingBudget};
use crate::budget::{AchievementOutcome, AchievementService, BudgetLine};
use crate::dashboard::{DashboardService, LedgerSnapshot, Timeframe, TrendMetric};

/// Header of the CSV export.
pub const CSV_HEADER: [&str; 11] = [
    "budget",
    "status",
    "cost_center",
    "line_type",
    "matching_model",
    "budgeted",
    "achieved",
    "achieved_percent",
    "amount_to_achieve",
    "budget_id",
    "line_id",
];

/// Service for generating budget reports.
pub struct ReportService;

impl ReportService {
    /// Builds the budget report, optionally for one cost center.
    ///
    /// Every section is computed from the same snapshot. The filter selects
    /// budgets and spend; achievement still reads every posted document because
    /// a line measures its model's cost center, not the budget's.
    #[must_use]
    pub fn budget_report(
        snapshot: LedgerSnapshot,
        cost_center_id: Option<CostCenterId>,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> BudgetReport {
        let (snapshot, all_documents) = match cost_center_id {
            Some(id) => {
                let documents = snapshot.documents.clone();
                (snapshot.restricted_to(id), Some(documents))
            }
            None => (snapshot, None),
        };
        let achievement_documents = all_documents.as_deref().unwrap_or(&snapshot.documents);

        let mut budgets: Vec<_> = snapshot.budgets.iter().collect();
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut rows = Vec::new();
        let mut pending_budgets = Vec::new();
        for budget in budgets {
            let lines: Vec<BudgetLine> = snapshot.lines_of(budget.id).cloned().collect();
            match AchievementService::budget_achievement(
                budget,
                &lines,
                &snapshot.models,
                achievement_documents,
            ) {
                AchievementOutcome::Computed(achievement) => {
                    let cost_center_name = snapshot
                        .cost_center_name(budget.cost_center_id)
                        .unwrap_or_default()
                        .to_string();
                    rows.extend(achievement.lines.into_iter().map(|line| BudgetReportRow {
                        budget_id: budget.id,
                        budget_name: budget.name.clone(),
                        budget_status: budget.status,
                        cost_center_id: budget.cost_center_id,
                        cost_center_name: cost_center_name.clone(),
                        line_id: line.line_id,
                        line_type: line.line_type,
                        matching_model_name: snapshot
                            .models
                            .get(line.matching_model_id)
                            .map(|m| m.name.clone())
                            .unwrap_or_default(),
                        budgeted: line.budgeted,
                        achieved: line.achieved,
                        achieved_percent: line.achieved_percent,
                        amount_to_achieve: line.amount_to_achieve,
                    }));
                }
                AchievementOutcome::NotComputable { budget_status, .. } => {
                    pending_budgets.push(PendingBudget {
                        budget_id: budget.id,
                        budget_name: budget.name.clone(),
                        budget_status,
                    });
                }
            }
        }

        BudgetReport {
            generated_at: now,
            timeframe,
            cost_center_id,
            kpis: DashboardService::kpis(&snapshot, timeframe, now),
            cost_center_spend: DashboardService::cost_center_spend(&snapshot, timeframe, now),
            spending_trend: DashboardService::trend(
                &snapshot,
                TrendMetric::Spending,
                timeframe,
                now,
            ),
            rows,
            pending_budgets,
        }
    }

    /// Writes the report rows as CSV.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Export` if writing fails.
    pub fn write_csv<W: Write>(report: &BudgetReport, writer: W) -> Result<(), ReportError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(CSV_HEADER)?;

        for row in &report.rows {
            wtr.write_record([
                row.budget_name.clone(),
                row.budget_status.as_str().to_string(),
                row.cost_center_name.clone(),
                row.line_type.as_str().to_string(),
                row.matching_model_name.clone(),
                row.budgeted.to_string(),
                row.achieved.to_string(),
                row.achieved_percent.to_string(),
                row.amount_to_achieve.map(|a| a.to_string()).unwrap_or_default(),
                row.budget_id.to_string(),
                row.line_id.to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// Renders the report rows as a CSV string.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Export` if writing fails.
    pub fn to_csv(report: &BudgetReport) -> Result<String, ReportError> {
        let mut buffer = Vec::new();
        Self::write_csv(report, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| ReportError::Export(e.to_string()))
    }
}
