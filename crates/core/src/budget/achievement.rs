//! Budget achievement: posted documents measured against budget lines.
//!
//! A line measures the cost center its matching model targets. Income lines
//! sum posted customer invoices and expense lines sum posted vendor bills,
//! restricted to documents created inside the budget window.

use costwise_shared::types::{BudgetId, BudgetLineId, CostCenterId, MatchingModelId};
use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{Budget, BudgetLine, BudgetLineType, BudgetStatus, DateRange};
use crate::documents::{Document, DocumentType};
use crate::matching::ModelRegistry;
use crate::percent::percent_of;

/// Decimal places of `achieved_percent`.
pub const ACHIEVED_PERCENT_DP: u32 = 2;

/// Achievement figures for one budget line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineAchievement {
    /// Budget line.
    pub line_id: BudgetLineId,
    /// Model the line measures.
    pub matching_model_id: MatchingModelId,
    /// Income or expense.
    pub line_type: BudgetLineType,
    /// Cost center the model resolved to, if the model exists.
    pub cost_center_id: Option<CostCenterId>,
    /// Budgeted amount.
    pub budgeted: Decimal,
    /// Posted amount inside the window.
    pub achieved: Decimal,
    /// `achieved / budgeted * 100`, two places.
    pub achieved_percent: Decimal,
    /// Income still to earn; not applicable to expense lines.
    pub amount_to_achieve: Option<Decimal>,
}

/// Achievement of every line of a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetAchievement {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub budget_name: String,
    /// Budget status at computation time.
    pub status: BudgetStatus,
    /// Window the documents were taken from.
    pub period: DateRange,
    /// Per-line figures in line order.
    pub lines: Vec<LineAchievement>,
    /// Sum of achieved over income lines.
    pub total_income_achieved: Decimal,
    /// Sum of achieved over expense lines.
    pub total_expense_achieved: Decimal,
}

/// Result of asking for a budget's achievement.
///
/// A budget that is not confirmed or revised has no achievement; this is
/// reported as its own outcome, never as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AchievementOutcome {
    /// Figures were computed.
    Computed(BudgetAchievement),
    /// Budget status does not allow achievement.
    NotComputable {
        /// Budget ID.
        budget_id: BudgetId,
        /// Status that blocked the computation.
        budget_status: BudgetStatus,
    },
}

/// Stateless achievement calculator.
pub struct AchievementService;

impl AchievementService {
    /// Document type that achieves a line type.
    #[must_use]
    pub const fn achieving_document(line_type: BudgetLineType) -> DocumentType {
        match line_type {
            BudgetLineType::Income => DocumentType::CustomerInvoice,
            BudgetLineType::Expense => DocumentType::VendorBill,
        }
    }

    /// Sums line totals of posted documents for a cost center within a period.
    ///
    /// Only documents whose status is exactly posted count. The creation
    /// date is compared by day, both ends inclusive.
    #[must_use]
    pub fn achieved(
        line_type: BudgetLineType,
        cost_center_id: CostCenterId,
        period: DateRange,
        documents: &[Document],
    ) -> Decimal {
        let document_type = Self::achieving_document(line_type);
        documents
            .iter()
            .filter(|d| {
                d.is_posted(document_type)
                    && d.cost_center_id == Some(cost_center_id)
                    && period.contains(d.created_on())
            })
            .flat_map(|d| d.lines.iter())
            .map(|l| l.line_total)
            .sum()
    }

    /// Percentage of the budget achieved, half away from zero.
    ///
    /// Zero when nothing is budgeted.
    #[must_use]
    pub fn achieved_percent(achieved: Decimal, budgeted: Decimal) -> Decimal {
        percent_of(achieved, budgeted, ACHIEVED_PERCENT_DP)
    }

    /// Income still to earn, floored at zero. `None` for expense lines.
    #[must_use]
    pub fn amount_to_achieve(
        line_type: BudgetLineType,
        budgeted: Decimal,
        achieved: Decimal,
    ) -> Option<Decimal> {
        match line_type {
            BudgetLineType::Income => Some((budgeted - achieved).max(Decimal::ZERO)),
            BudgetLineType::Expense => None,
        }
    }

    /// Computes one line's figures.
    ///
    /// A line whose model is missing achieves zero.
    #[must_use]
    pub fn line_achievement(
        line: &BudgetLine,
        period: DateRange,
        models: &ModelRegistry,
        documents: &[Document],
    ) -> LineAchievement {
        let cost_center_id = models.get(line.matching_model_id).map(|m| m.cost_center_id);

        let achieved = match cost_center_id {
            Some(cc) => Self::achieved(line.line_type, cc, period, documents),
            None => {
                tracing::warn!(
                    line_id = %line.id,
                    model_id = %line.matching_model_id,
                    "Budget line references missing matching model"
                );
                Decimal::ZERO
            }
        };

        LineAchievement {
            line_id: line.id,
            matching_model_id: line.matching_model_id,
            line_type: line.line_type,
            cost_center_id,
            budgeted: line.budgeted_amount,
            achieved,
            achieved_percent: Self::achieved_percent(achieved, line.budgeted_amount),
            amount_to_achieve: Self::amount_to_achieve(
                line.line_type,
                line.budgeted_amount,
                achieved,
            ),
        }
    }

    /// Computes achievement for every line of a budget.
    ///
    /// Lines of other budgets are ignored. The period is the budget window.
    #[must_use]
    pub fn budget_achievement(
        budget: &Budget,
        lines: &[BudgetLine],
        models: &ModelRegistry,
        documents: &[Document],
    ) -> AchievementOutcome {
        if !budget.status.is_achievement_computable() {
            return AchievementOutcome::NotComputable {
                budget_id: budget.id,
                budget_status: budget.status,
            };
        }

        let period = budget.period();
        let lines: Vec<_> = lines
            .iter()
            .filter(|l| l.budget_id == budget.id)
            .map(|l| Self::line_achievement(l, period, models, documents))
            .collect();

        let total_for = |line_type: BudgetLineType| -> Decimal {
            lines
                .iter()
                .filter(|l| l.line_type == line_type)
                .map(|l| l.achieved)
                .sum()
        };

        AchievementOutcome::Computed(BudgetAchievement {
            budget_id: budget.id,
            budget_name: budget.name.clone(),
            status: budget.status,
            period,
            total_income_achieved: total_for(BudgetLineType::Income),
            total_expense_achieved: total_for(BudgetLineType::Expense),
            lines,
        })
    }
}
