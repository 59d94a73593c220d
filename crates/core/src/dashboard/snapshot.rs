//! A consistent read of everything the aggregations need.

use chrono::{DateTime, Duration, Utc};
use costwise_shared::types::{BudgetId, CostCenterId};

use crate::budget::{Budget, BudgetLine};
use crate::documents::{Document, DocumentStatus};
use crate::matching::ModelRegistry;
use crate::reference::CostCenter;

use super::types::Timeframe;

/// Budgets, documents, and models loaded at one point in time.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    /// All budgets.
    pub budgets: Vec<Budget>,
    /// All budget lines.
    pub budget_lines: Vec<BudgetLine>,
    /// All documents with their lines.
    pub documents: Vec<Document>,
    /// All matching models.
    pub models: ModelRegistry,
    /// All cost centers.
    pub cost_centers: Vec<CostCenter>,
}

impl LedgerSnapshot {
    /// Lines of one budget, in creation order.
    pub fn lines_of(&self, budget_id: BudgetId) -> impl Iterator<Item = &BudgetLine> {
        self.budget_lines
            .iter()
            .filter(move |l| l.budget_id == budget_id)
    }

    /// Name of a cost center, if it exists.
    #[must_use]
    pub fn cost_center_name(&self, id: CostCenterId) -> Option<&str> {
        self.cost_centers
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Posted purchase orders and vendor bills.
    pub fn spend(&self) -> impl Iterator<Item = &Document> {
        self.documents
            .iter()
            .filter(|d| d.status == DocumentStatus::Posted && d.document_type.is_spend())
    }

    /// Posted purchase spend created at or after `since`.
    pub fn spend_since(&self, since: DateTime<Utc>) -> impl Iterator<Item = &Document> {
        self.spend().filter(move |d| d.created_at >= since)
    }

    /// Posted purchase spend in the trailing window ending at `now`.
    pub fn spend_in(
        &self,
        timeframe: Timeframe,
        now: DateTime<Utc>,
    ) -> impl Iterator<Item = &Document> {
        self.spend_since(now - Duration::days(timeframe.days()))
    }

    /// Keeps only budgets, lines, and documents of one cost center.
    ///
    /// Documents are matched on their header cost center.
    #[must_use]
    pub fn restricted_to(mut self, cost_center_id: CostCenterId) -> Self {
        self.budgets.retain(|b| b.cost_center_id == cost_center_id);
        let budget_ids: Vec<_> = self.budgets.iter().map(|b| b.id).collect();
        self.budget_lines.retain(|l| budget_ids.contains(&l.budget_id));
        self.documents.retain(|d| d.cost_center_id == Some(cost_center_id));
        self
    }
}
