//! Budget lifecycle, revision, and selection.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use costwise_shared::types::{BudgetId, BudgetLineId, CostCenterId};
use serde::Serialize;

use super::error::BudgetError;
use super::types::{Budget, BudgetLine, BudgetStatus};

/// A draft copy of a confirmed budget, with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    /// The budget that was revised.
    pub original_id: BudgetId,
    /// The new draft budget.
    pub budget: Budget,
    /// Copies of the original lines.
    pub lines: Vec<BudgetLine>,
}

/// Budget service for lifecycle rules.
pub struct BudgetService;

impl BudgetService {
    /// Moves a draft budget to active.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTransition` unless the budget is draft.
    pub fn activate(budget: &mut Budget, now: DateTime<Utc>) -> Result<(), BudgetError> {
        Self::transition(budget, BudgetStatus::Active, now)
    }

    /// Confirms a draft or active budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTransition` for any other status.
    pub fn confirm(budget: &mut Budget, now: DateTime<Utc>) -> Result<(), BudgetError> {
        Self::transition(budget, BudgetStatus::Confirmed, now)
    }

    /// Cancels a draft, active, or confirmed budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidTransition` for revised or cancelled budgets.
    pub fn cancel(budget: &mut Budget, now: DateTime<Utc>) -> Result<(), BudgetError> {
        Self::transition(budget, BudgetStatus::Cancelled, now)
    }

    fn transition(
        budget: &mut Budget,
        to: BudgetStatus,
        now: DateTime<Utc>,
    ) -> Result<(), BudgetError> {
        budget.status = budget.status.transition_to(to)?;
        budget.updated_at = now;
        Ok(())
    }

    /// Revises a confirmed budget.
    ///
    /// Marks `original` as revised and returns a draft clone with the same
    /// name, cost center, amount and window, plus a by-value copy of every line.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotRevisable` unless the budget is confirmed.
    pub fn revise(
        original: &mut Budget,
        lines: &[BudgetLine],
        now: DateTime<Utc>,
    ) -> Result<Revision, BudgetError> {
        if original.status != BudgetStatus::Confirmed {
            return Err(BudgetError::NotRevisable(original.status));
        }

        let budget = Budget {
            id: BudgetId::new(),
            status: BudgetStatus::Draft,
            revised_from_id: Some(original.id),
            created_at: now,
            updated_at: now,
            ..original.clone()
        };

        let lines = lines
            .iter()
            .filter(|line| line.budget_id == original.id)
            .map(|line| BudgetLine {
                id: BudgetLineId::new(),
                budget_id: budget.id,
                created_at: now,
                ..line.clone()
            })
            .collect();

        original.status = BudgetStatus::Revised;
        original.updated_at = now;

        Ok(Revision {
            original_id: original.id,
            budget,
            lines,
        })
    }

    /// Walks `revised_from_id` links from `start` back to the first budget.
    ///
    /// The result starts with `start`. A link to a budget that `lookup` cannot
    /// find ends the chain.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::RevisionCycle` if a budget is reached twice.
    pub fn revision_chain<'a, F>(
        start: &'a Budget,
        mut lookup: F,
    ) -> Result<Vec<&'a Budget>, BudgetError>
    where
        F: FnMut(BudgetId) -> Option<&'a Budget>,
    {
        let mut seen = HashSet::from([start.id]);
        let mut chain = vec![start];
        let mut current = start;

        while let Some(parent_id) = current.revised_from_id {
            if !seen.insert(parent_id) {
                return Err(BudgetError::RevisionCycle(start.id));
            }
            let Some(parent) = lookup(parent_id) else {
                tracing::warn!(
                    budget_id = %current.id,
                    %parent_id,
                    "Revision chain ends at missing budget"
                );
                break;
            };
            chain.push(parent);
            current = parent;
        }

        Ok(chain)
    }

    /// Picks the budget a posting on `date` for `cost_center_id` counts against.
    ///
    /// Among confirmed budgets of the cost center whose window contains the
    /// date, the most recently created wins.
    #[must_use]
    pub fn select_for<'a>(
        budgets: &'a [Budget],
        cost_center_id: CostCenterId,
        date: NaiveDate,
    ) -> Option<&'a Budget> {
        budgets
            .iter()
            .filter(|b| {
                b.status == BudgetStatus::Confirmed
                    && b.cost_center_id == cost_center_id
                    && b.contains(date)
            })
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::{BudgetLineType, NewBudget, NewBudgetLine};
    use chrono::Duration;
    use costwise_shared::types::MatchingModelId;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn budget(cost_center_id: CostCenterId, now: DateTime<Utc>) -> Budget {
        Budget::new(
            NewBudget {
                name: "FY Plan".to_string(),
                cost_center_id,
                amount: dec!(50000),
                start_date: date(2025, 1, 1),
                end_date: date(2025, 12, 31),
            },
            now,
        )
        .unwrap()
    }

    #[test]
    fn test_lifecycle_paths() {
        let now = Utc::now();
        let mut b = budget(CostCenterId::new(), now);
        BudgetService::activate(&mut b, now).unwrap();
        BudgetService::confirm(&mut b, now).unwrap();
        assert_eq!(b.status, BudgetStatus::Confirmed);
        assert!(BudgetService::activate(&mut b, now).is_err());

        let mut direct = budget(CostCenterId::new(), now);
        BudgetService::confirm(&mut direct, now).unwrap();
        BudgetService::cancel(&mut direct, now).unwrap();
        assert_eq!(
            BudgetService::confirm(&mut direct, now),
            Err(BudgetError::InvalidTransition {
                from: BudgetStatus::Cancelled,
                to: BudgetStatus::Confirmed
            })
        );
    }

    #[test]
    fn test_revise_clones_budget_and_lines() {
        let now = Utc::now();
        let mut original = budget(CostCenterId::new(), now);
        let lines: Vec<_> = [BudgetLineType::Income, BudgetLineType::Expense]
            .into_iter()
            .map(|line_type| {
                BudgetLine::new(
                    &original,
                    NewBudgetLine {
                        matching_model_id: MatchingModelId::new(),
                        line_type,
                        budgeted_amount: dec!(1000),
                    },
                    now,
                )
                .unwrap()
            })
            .collect();
        BudgetService::confirm(&mut original, now).unwrap();

        let later = now + Duration::minutes(5);
        let revision = BudgetService::revise(&mut original, &lines, later).unwrap();

        assert_eq!(original.status, BudgetStatus::Revised);
        assert_eq!(revision.original_id, original.id);
        assert_eq!(revision.budget.status, BudgetStatus::Draft);
        assert_eq!(revision.budget.revised_from_id, Some(original.id));
        assert_eq!(revision.budget.name, original.name);
        assert_eq!(revision.budget.amount, original.amount);
        assert_eq!(revision.budget.period(), original.period());
        assert_eq!(revision.lines.len(), lines.len());
        for (copy, source) in revision.lines.iter().zip(&lines) {
            assert_ne!(copy.id, source.id);
            assert_eq!(copy.budget_id, revision.budget.id);
            assert_eq!(copy.matching_model_id, source.matching_model_id);
            assert_eq!(copy.line_type, source.line_type);
            assert_eq!(copy.budgeted_amount, source.budgeted_amount);
        }
    }

    #[test]
    fn test_revise_requires_confirmed() {
        let now = Utc::now();
        let mut draft = budget(CostCenterId::new(), now);
        assert_eq!(
            BudgetService::revise(&mut draft, &[], now),
            Err(BudgetError::NotRevisable(BudgetStatus::Draft))
        );
        assert_eq!(draft.status, BudgetStatus::Draft);

        BudgetService::confirm(&mut draft, now).unwrap();
        BudgetService::revise(&mut draft, &[], now).unwrap();
        assert_eq!(
            BudgetService::revise(&mut draft, &[], now),
            Err(BudgetError::NotRevisable(BudgetStatus::Revised))
        );
    }

    #[test]
    fn test_revision_chain_walks_to_root() {
        let now = Utc::now();
        let mut first = budget(CostCenterId::new(), now);
        BudgetService::confirm(&mut first, now).unwrap();
        let mut second = BudgetService::revise(&mut first, &[], now).unwrap().budget;
        BudgetService::confirm(&mut second, now).unwrap();
        let third = BudgetService::revise(&mut second, &[], now).unwrap().budget;

        let all = [first.clone(), second.clone(), third.clone()];
        let chain =
            BudgetService::revision_chain(&third, |id| all.iter().find(|b| b.id == id)).unwrap();
        let ids: Vec<_> = chain.iter().map(|b| b.id).collect();
        assert_eq!(ids, [third.id, second.id, first.id]);
    }

    #[test]
    fn test_revision_chain_detects_cycle() {
        let now = Utc::now();
        let mut a = budget(CostCenterId::new(), now);
        let mut b = budget(CostCenterId::new(), now);
        a.revised_from_id = Some(b.id);
        b.revised_from_id = Some(a.id);

        let all = [a.clone(), b];
        assert_eq!(
            BudgetService::revision_chain(&a, |id| all.iter().find(|x| x.id == id)),
            Err(BudgetError::RevisionCycle(a.id))
        );
    }

    #[test]
    fn test_select_for_prefers_latest_confirmed() {
        let now = Utc::now();
        let cc = CostCenterId::new();
        let mut older = budget(cc, now);
        let mut newer = budget(cc, now + Duration::hours(1));
        let mut other_cc = budget(CostCenterId::new(), now + Duration::hours(2));
        let draft = budget(cc, now + Duration::hours(3));
        for b in [&mut older, &mut newer, &mut other_cc] {
            BudgetService::confirm(b, now).unwrap();
        }
        let budgets = vec![older, newer.clone(), other_cc, draft];

        let selected = BudgetService::select_for(&budgets, cc, date(2025, 6, 1)).unwrap();
        assert_eq!(selected.id, newer.id);
        assert!(BudgetService::select_for(&budgets, cc, date(2026, 1, 1)).is_none());
    }
}
