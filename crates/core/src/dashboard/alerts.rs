//! Budget alerts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::health::classify_health;
use super::service::{DashboardService, UTILIZATION_DP};
use super::snapshot::LedgerSnapshot;
use super::types::{Alert, AlertKind, AlertSeverity, HealthStatus, Timeframe};
use crate::budget::{AchievementService, Budget, BudgetLineType, BudgetStatus};
use crate::percent::percent_of;

impl DashboardService {
    /// Raises alerts for confirmed budgets covering today, their expense
    /// lines, and the portfolio as a whole. Critical alerts come first.
    #[must_use]
    pub fn alerts(
        snapshot: &LedgerSnapshot,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        let today = now.date_naive();
        let mut alerts = Vec::new();

        for budget in snapshot
            .budgets
            .iter()
            .filter(|b| b.status == BudgetStatus::Confirmed && b.contains(today))
        {
            let utilization = Self::budget_utilization(snapshot, budget);
            if let Some(severity) = severity_of(classify_health(utilization)) {
                alerts.push(Alert {
                    kind: AlertKind::BudgetUtilization,
                    severity,
                    message: format!("Budget '{}' is at {utilization}% utilization", budget.name),
                    budget_id: Some(budget.id),
                    budget_line_id: None,
                    cost_center_id: Some(budget.cost_center_id),
                    percent: utilization,
                });
            }

            for line in snapshot
                .lines_of(budget.id)
                .filter(|l| l.line_type == BudgetLineType::Expense)
            {
                let achievement = AchievementService::line_achievement(
                    line,
                    budget.period(),
                    &snapshot.models,
                    &snapshot.documents,
                );
                if achievement.achieved > achievement.budgeted {
                    alerts.push(Alert {
                        kind: AlertKind::LineOverBudget,
                        severity: AlertSeverity::Critical,
                        message: format!(
                            "Expense line of budget '{}' is over budget: {} spent of {}",
                            budget.name, achievement.achieved, achievement.budgeted
                        ),
                        budget_id: Some(budget.id),
                        budget_line_id: Some(line.id),
                        cost_center_id: achievement.cost_center_id,
                        percent: achievement.achieved_percent,
                    });
                }
            }
        }

        let kpis = Self::kpis(snapshot, timeframe, now);
        if let Some(severity) = severity_of(kpis.health_status) {
            alerts.push(Alert {
                kind: AlertKind::PortfolioHealth,
                severity,
                message: format!(
                    "Overall spend is at {}% of budget this {timeframe}",
                    kpis.utilization
                ),
                budget_id: None,
                budget_line_id: None,
                cost_center_id: None,
                percent: kpis.utilization,
            });
        }

        alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
        alerts
    }

    /// Posted purchase spend of a budget's cost center inside its window,
    /// as a percentage of the budget amount.
    #[must_use]
    pub fn budget_utilization(snapshot: &LedgerSnapshot, budget: &Budget) -> Decimal {
        let spent: Decimal = snapshot
            .spend()
            .filter(|d| {
                d.cost_center_id == Some(budget.cost_center_id) && budget.contains(d.created_on())
            })
            .map(|d| d.total_amount)
            .sum();
        percent_of(spent, budget.amount, UTILIZATION_DP)
    }
}

const fn severity_of(health: HealthStatus) -> Option<AlertSeverity> {
    match health {
        HealthStatus::Healthy => None,
        HealthStatus::Warning => Some(AlertSeverity::Warning),
        HealthStatus::Critical => Some(AlertSeverity::Critical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{BudgetLine, NewBudgetLine};
    use crate::dashboard::tests::{budget, posted, Fixture};
    use crate::documents::DocumentType;
    use crate::matching::{MatchCriteria, MatchingModel, ModelRegistry, NewMatchingModel};
    use rust_decimal_macros::dec;

    #[test]
    fn test_budget_utilization_alerts() {
        let f = Fixture::new();
        let now = f.now;
        let snapshot = LedgerSnapshot {
            budgets: vec![
                budget(f.production.id, dec!(1000), now, BudgetStatus::Confirmed),
                budget(f.sales.id, dec!(1000), now, BudgetStatus::Confirmed),
            ],
            documents: vec![
                posted(DocumentType::VendorBill, f.production.id, now, dec!(800)),
                posted(DocumentType::VendorBill, f.sales.id, now, dec!(950)),
            ],
            ..f.snapshot()
        };

        let alerts = DashboardService::alerts(&snapshot, Timeframe::Month, now);
        let summary: Vec<_> = alerts
            .iter()
            .map(|a| (a.kind, a.severity, a.cost_center_id, a.percent))
            .collect();
        assert_eq!(
            summary,
            [
                (AlertKind::BudgetUtilization, AlertSeverity::Critical, Some(f.sales.id), dec!(95.0)),
                (AlertKind::BudgetUtilization, AlertSeverity::Warning, Some(f.production.id), dec!(80.0)),
                (AlertKind::PortfolioHealth, AlertSeverity::Warning, None, dec!(87.5)),
            ]
        );
    }

    #[test]
    fn test_healthy_portfolio_has_no_alerts() {
        let f = Fixture::new();
        let snapshot = LedgerSnapshot {
            budgets: vec![budget(f.sales.id, dec!(1000), f.now, BudgetStatus::Confirmed)],
            documents: vec![posted(DocumentType::VendorBill, f.sales.id, f.now, dec!(700))],
            ..f.snapshot()
        };

        assert!(DashboardService::alerts(&snapshot, Timeframe::Month, f.now).is_empty());
    }

    #[test]
    fn test_expense_line_over_budget() {
        let f = Fixture::new();
        let now = f.now;
        let model = MatchingModel::new(
            NewMatchingModel {
                name: "Sales spend".to_string(),
                criteria: MatchCriteria::any(),
                cost_center_id: Some(f.sales.id),
            },
            now,
        )
        .unwrap();
        let mut b = budget(f.sales.id, dec!(100000), now, BudgetStatus::Draft);
        let line = BudgetLine::new(
            &b,
            NewBudgetLine {
                matching_model_id: model.id,
                line_type: BudgetLineType::Expense,
                budgeted_amount: dec!(500),
            },
            now,
        )
        .unwrap();
        b.status = BudgetStatus::Confirmed;
        let snapshot = LedgerSnapshot {
            budgets: vec![b.clone()],
            budget_lines: vec![line.clone()],
            documents: vec![posted(DocumentType::VendorBill, f.sales.id, now, dec!(600))],
            models: ModelRegistry::new(vec![model]),
            ..f.snapshot()
        };

        let alerts = DashboardService::alerts(&snapshot, Timeframe::Month, now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::LineOverBudget);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
        assert_eq!(alerts[0].budget_line_id, Some(line.id));
        assert_eq!(alerts[0].percent, dec!(120.00));
    }
}
