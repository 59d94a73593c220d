//! Dashboard KPIs and cost-center spend.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use costwise_shared::types::CostCenterId;
use rust_decimal::Decimal;

use super::health::classify_health;
use super::snapshot::LedgerSnapshot;
use super::types::{CostCenterSpend, Kpis, Timeframe};
use crate::budget::BudgetStatus;
use crate::percent::percent_of;

/// Decimal places of utilization and share figures.
pub const UTILIZATION_DP: u32 = 1;

/// Label for spend without a cost center.
pub const UNASSIGNED_LABEL: &str = "Unassigned";

/// Service for dashboard aggregations.
pub struct DashboardService;

impl DashboardService {
    /// Computes portfolio KPIs.
    ///
    /// Budgets count when confirmed and covering today; spend counts when
    /// posted inside the trailing window.
    #[must_use]
    pub fn kpis(snapshot: &LedgerSnapshot, timeframe: Timeframe, now: DateTime<Utc>) -> Kpis {
        let today = now.date_naive();
        let total_budget: Decimal = snapshot
            .budgets
            .iter()
            .filter(|b| b.status == BudgetStatus::Confirmed && b.contains(today))
            .map(|b| b.amount)
            .sum();
        let total_actual: Decimal = snapshot
            .spend_in(timeframe, now)
            .map(|d| d.total_amount)
            .sum();
        let utilization = percent_of(total_actual, total_budget, UTILIZATION_DP);

        Kpis {
            timeframe,
            total_budget,
            total_actual,
            remaining: total_budget - total_actual,
            utilization,
            health_status: classify_health(utilization),
        }
    }

    /// Spend per cost center in the window, largest first.
    #[must_use]
    pub fn cost_center_spend(
        snapshot: &LedgerSnapshot,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> Vec<CostCenterSpend> {
        let mut totals: BTreeMap<Option<CostCenterId>, Decimal> = BTreeMap::new();
        for document in snapshot.spend_in(timeframe, now) {
            *totals.entry(document.cost_center_id).or_default() += document.total_amount;
        }
        let grand_total: Decimal = totals.values().copied().sum();

        let mut spend: Vec<_> = totals
            .into_iter()
            .map(|(cost_center_id, amount)| CostCenterSpend {
                cost_center_id,
                cost_center_name: cost_center_id
                    .and_then(|id| snapshot.cost_center_name(id))
                    .unwrap_or(UNASSIGNED_LABEL)
                    .to_string(),
                amount,
                share_percent: percent_of(amount, grand_total, UTILIZATION_DP),
            })
            .collect();
        spend.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.cost_center_name.cmp(&b.cost_center_name))
        });
        spend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::{budget, posted, Fixture};
    use crate::dashboard::types::HealthStatus;
    use crate::documents::{DocumentStatus, DocumentType};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kpis() {
        let f = Fixture::new();
        let now = f.now;
        let snapshot = LedgerSnapshot {
            budgets: vec![
                budget(f.production.id, dec!(10000), now, BudgetStatus::Confirmed),
                budget(f.sales.id, dec!(5000), now, BudgetStatus::Confirmed),
                budget(f.sales.id, dec!(99999), now, BudgetStatus::Draft),
            ],
            documents: vec![
                posted(DocumentType::VendorBill, f.production.id, now - Duration::days(3), dec!(6000)),
                posted(DocumentType::PurchaseOrder, f.sales.id, now - Duration::days(10), dec!(3000)),
                posted(DocumentType::VendorBill, f.sales.id, now - Duration::days(45), dec!(7000)),
                posted(DocumentType::CustomerInvoice, f.sales.id, now, dec!(8000)),
            ],
            ..f.snapshot()
        };

        let week = DashboardService::kpis(&snapshot, Timeframe::Week, now);
        assert_eq!(week.total_budget, dec!(15000));
        assert_eq!(week.total_actual, dec!(6000));
        assert_eq!(week.remaining, dec!(9000));
        assert_eq!(week.utilization, dec!(40.0));
        assert_eq!(week.health_status, HealthStatus::Healthy);

        let month = DashboardService::kpis(&snapshot, Timeframe::Month, now);
        assert_eq!(month.total_actual, dec!(9000));
        assert_eq!(month.utilization, dec!(60.0));

        let year = DashboardService::kpis(&snapshot, Timeframe::Year, now);
        assert_eq!(year.total_actual, dec!(16000));
        assert_eq!(year.remaining, dec!(-1000));
        assert_eq!(year.utilization, dec!(106.7));
        assert_eq!(year.health_status, HealthStatus::Critical);
    }

    #[test]
    fn test_kpis_without_budget() {
        let f = Fixture::new();
        let snapshot = LedgerSnapshot {
            documents: vec![posted(DocumentType::VendorBill, f.sales.id, f.now, dec!(100))],
            ..f.snapshot()
        };

        let kpis = DashboardService::kpis(&snapshot, Timeframe::Month, f.now);
        assert_eq!(kpis.total_budget, Decimal::ZERO);
        assert_eq!(kpis.utilization, Decimal::ZERO);
        assert_eq!(kpis.remaining, dec!(-100));
        assert_eq!(kpis.health_status, HealthStatus::Healthy);
    }

    #[test]
    fn test_cost_center_spend() {
        let f = Fixture::new();
        let mut unassigned = posted(DocumentType::VendorBill, f.sales.id, f.now, dec!(250));
        unassigned.cost_center_id = None;
        let mut draft = posted(DocumentType::VendorBill, f.sales.id, f.now, dec!(9999));
        draft.status = DocumentStatus::Draft;
        let snapshot = LedgerSnapshot {
            documents: vec![
                posted(DocumentType::VendorBill, f.sales.id, f.now, dec!(250)),
                posted(DocumentType::PurchaseOrder, f.production.id, f.now, dec!(500)),
                unassigned,
                draft,
            ],
            ..f.snapshot()
        };

        let spend = DashboardService::cost_center_spend(&snapshot, Timeframe::Month, f.now);
        let rows: Vec<_> = spend
            .iter()
            .map(|s| (s.cost_center_name.as_str(), s.amount, s.share_percent))
            .collect();
        assert_eq!(
            rows,
            [
                ("Production", dec!(500), dec!(50.0)),
                ("Sales", dec!(250), dec!(25.0)),
                (UNASSIGNED_LABEL, dec!(250), dec!(25.0)),
            ]
        );
    }
}
