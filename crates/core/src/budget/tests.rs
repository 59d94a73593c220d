//! Property and scenario tests for budget achievement.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use costwise_shared::types::{ContactId, CostCenterId, ProductId};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::documents::{Document, DocumentStatus, DocumentType, NewDocument, NewDocumentLine};
use crate::matching::{MatchCriteria, MatchingModel, ModelRegistry, NewMatchingModel};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
}

fn document(
    document_type: DocumentType,
    status: DocumentStatus,
    cost_center_id: CostCenterId,
    created_at: DateTime<Utc>,
    amounts: &[Decimal],
) -> Document {
    let mut doc = Document::new(
        NewDocument {
            document_type,
            contact_id: ContactId::new(),
            cost_center_id: Some(cost_center_id),
            awaiting_vendor: false,
            lines: amounts
                .iter()
                .map(|amount| NewDocumentLine {
                    product_id: ProductId::new(),
                    quantity: Decimal::ONE,
                    unit_price: *amount,
                })
                .collect(),
        },
        created_at,
    )
    .unwrap();
    doc.status = status;
    doc
}

fn invoice(cc: CostCenterId, created_at: DateTime<Utc>, amount: Decimal) -> Document {
    document(
        DocumentType::CustomerInvoice,
        DocumentStatus::Posted,
        cc,
        created_at,
        &[amount],
    )
}

fn model_for(cc: CostCenterId) -> MatchingModel {
    MatchingModel::new(
        NewMatchingModel {
            name: "Division".to_string(),
            criteria: MatchCriteria::any(),
            cost_center_id: Some(cc),
        },
        Utc::now(),
    )
    .unwrap()
}

struct Plan {
    budget: Budget,
    lines: Vec<BudgetLine>,
    models: ModelRegistry,
    cost_center: CostCenterId,
}

fn plan(lines: &[(BudgetLineType, Decimal)]) -> Plan {
    let cost_center = CostCenterId::new();
    let model = model_for(cost_center);
    let now = at(2025, 1, 1);
    let mut budget = Budget::new(
        NewBudget {
            name: "2025 Plan".to_string(),
            cost_center_id: cost_center,
            amount: lines.iter().map(|(_, a)| *a).sum(),
            start_date: date(2025, 1, 1),
            end_date: date(2025, 12, 31),
        },
        now,
    )
    .unwrap();
    let lines = lines
        .iter()
        .map(|(line_type, amount)| {
            BudgetLine::new(
                &budget,
                NewBudgetLine {
                    matching_model_id: model.id,
                    line_type: *line_type,
                    budgeted_amount: *amount,
                },
                now,
            )
            .unwrap()
        })
        .collect();
    BudgetService::confirm(&mut budget, now).unwrap();

    Plan {
        budget,
        lines,
        models: ModelRegistry::new(vec![model]),
        cost_center,
    }
}

fn computed(outcome: AchievementOutcome) -> BudgetAchievement {
    match outcome {
        AchievementOutcome::Computed(achievement) => achievement,
        AchievementOutcome::NotComputable { budget_status, .. } => {
            panic!("expected computed achievement, budget is {budget_status}")
        }
    }
}

#[test]
fn test_income_line_achievement() {
    let p = plan(&[(BudgetLineType::Income, dec!(10000))]);
    let documents = vec![
        invoice(p.cost_center, at(2025, 3, 1), dec!(4000)),
        invoice(p.cost_center, at(2025, 6, 15), dec!(3000)),
    ];

    let result = computed(AchievementService::budget_achievement(
        &p.budget,
        &p.lines,
        &p.models,
        &documents,
    ));
    let line = &result.lines[0];
    assert_eq!(line.achieved, dec!(7000));
    assert_eq!(line.achieved_percent, dec!(70.00));
    assert_eq!(line.amount_to_achieve, Some(dec!(3000)));
    assert_eq!(line.cost_center_id, Some(p.cost_center));
    assert_eq!(result.total_income_achieved, dec!(7000));
    assert_eq!(result.total_expense_achieved, Decimal::ZERO);
}

#[test]
fn test_excluded_documents_do_not_count() {
    let p = plan(&[(BudgetLineType::Income, dec!(10000))]);
    let cc = p.cost_center;
    let documents = vec![
        invoice(cc, at(2025, 3, 1), dec!(1000)),
        // Outside the window on either side.
        invoice(cc, at(2024, 12, 31), dec!(500)),
        invoice(cc, at(2026, 1, 1), dec!(500)),
        // Not exactly posted.
        document(DocumentType::CustomerInvoice, DocumentStatus::Draft, cc, at(2025, 3, 2), &[dec!(500)]),
        document(DocumentType::CustomerInvoice, DocumentStatus::Paid, cc, at(2025, 3, 3), &[dec!(500)]),
        document(DocumentType::CustomerInvoice, DocumentStatus::Cancelled, cc, at(2025, 3, 4), &[dec!(500)]),
        // Wrong type or cost center.
        document(DocumentType::VendorBill, DocumentStatus::Posted, cc, at(2025, 3, 5), &[dec!(500)]),
        document(DocumentType::SalesOrder, DocumentStatus::Posted, cc, at(2025, 3, 6), &[dec!(500)]),
        invoice(CostCenterId::new(), at(2025, 3, 7), dec!(500)),
    ];

    let result = computed(AchievementService::budget_achievement(
        &p.budget,
        &p.lines,
        &p.models,
        &documents,
    ));
    assert_eq!(result.lines[0].achieved, dec!(1000));
}

#[test]
fn test_window_boundaries_are_inclusive() {
    let p = plan(&[(BudgetLineType::Income, dec!(100))]);
    let cc = p.cost_center;
    let documents = vec![
        invoice(cc, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), dec!(10)),
        invoice(cc, Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap(), dec!(20)),
    ];

    let achieved = AchievementService::achieved(
        BudgetLineType::Income,
        cc,
        p.budget.period(),
        &documents,
    );
    assert_eq!(achieved, dec!(30));
}

#[test]
fn test_expense_line_has_no_amount_to_achieve() {
    let p = plan(&[(BudgetLineType::Expense, dec!(2000))]);
    let documents = vec![document(
        DocumentType::VendorBill,
        DocumentStatus::Posted,
        p.cost_center,
        at(2025, 2, 1),
        &[dec!(1500), dec!(900)],
    )];

    let result = computed(AchievementService::budget_achievement(
        &p.budget,
        &p.lines,
        &p.models,
        &documents,
    ));
    let line = &result.lines[0];
    assert_eq!(line.achieved, dec!(2400));
    assert_eq!(line.achieved_percent, dec!(120.00));
    assert_eq!(line.amount_to_achieve, None);
    assert_eq!(result.total_expense_achieved, dec!(2400));
}

#[test]
fn test_draft_budget_is_not_computable() {
    let p = plan(&[(BudgetLineType::Income, dec!(100))]);
    for status in [BudgetStatus::Draft, BudgetStatus::Active, BudgetStatus::Cancelled] {
        let mut budget = p.budget.clone();
        budget.status = status;
        assert_eq!(
            AchievementService::budget_achievement(&budget, &p.lines, &p.models, &[]),
            AchievementOutcome::NotComputable {
                budget_id: budget.id,
                budget_status: status,
            }
        );
    }
}

#[test]
fn test_revised_budget_is_computable() {
    let mut p = plan(&[(BudgetLineType::Income, dec!(100))]);
    let documents = vec![invoice(p.cost_center, at(2025, 5, 5), dec!(40))];
    BudgetService::revise(&mut p.budget, &p.lines, Utc::now()).unwrap();

    let result = computed(AchievementService::budget_achievement(
        &p.budget,
        &p.lines,
        &p.models,
        &documents,
    ));
    assert_eq!(result.status, BudgetStatus::Revised);
    assert_eq!(result.lines[0].achieved, dec!(40));
}

#[test]
fn test_missing_model_achieves_zero() {
    let p = plan(&[(BudgetLineType::Income, dec!(100))]);
    let documents = vec![invoice(p.cost_center, at(2025, 5, 5), dec!(40))];

    let result = computed(AchievementService::budget_achievement(
        &p.budget,
        &p.lines,
        &ModelRegistry::default(),
        &documents,
    ));
    let line = &result.lines[0];
    assert_eq!(line.achieved, Decimal::ZERO);
    assert_eq!(line.cost_center_id, None);
    assert_eq!(line.amount_to_achieve, Some(dec!(100)));
}

#[test]
fn test_manufacturing_scenario() {
    let p = plan(&[
        (BudgetLineType::Income, dec!(200000)),
        (BudgetLineType::Expense, dec!(50000)),
    ]);
    let cc = p.cost_center;
    let documents = vec![
        invoice(cc, at(2025, 2, 10), dec!(50000)),
        document(
            DocumentType::CustomerInvoice,
            DocumentStatus::Posted,
            cc,
            at(2025, 4, 20),
            &[dec!(20000), dec!(12000)],
        ),
        invoice(cc, at(2024, 11, 30), dec!(99000)),
        document(DocumentType::VendorBill, DocumentStatus::Posted, cc, at(2025, 3, 1), &[dec!(18000)]),
    ];

    let result = computed(AchievementService::budget_achievement(
        &p.budget,
        &p.lines,
        &p.models,
        &documents,
    ));
    let income = &result.lines[0];
    assert_eq!(income.achieved, dec!(82000));
    assert_eq!(income.achieved_percent, dec!(41.00));
    assert_eq!(income.amount_to_achieve, Some(dec!(118000)));

    let expense = &result.lines[1];
    assert_eq!(expense.achieved, dec!(18000));
    assert_eq!(expense.achieved_percent, dec!(36.00));
}

proptest! {
    #[test]
    fn prop_achieved_is_sum_of_in_window_posted_lines(
        amounts in prop::collection::vec(1i64..1_000_000, 0..10),
        offsets in prop::collection::vec(-30i64..400, 0..10),
    ) {
        let p = plan(&[(BudgetLineType::Income, dec!(1000))]);
        let start = at(2025, 1, 1);
        let mut expected = Decimal::ZERO;
        let documents: Vec<_> = amounts
            .iter()
            .zip(&offsets)
            .map(|(amount, offset)| {
                let created_at = start + Duration::days(*offset);
                let amount = Decimal::from(*amount);
                if p.budget.contains(created_at.date_naive()) {
                    expected += amount;
                }
                invoice(p.cost_center, created_at, amount)
            })
            .collect();

        let achieved = AchievementService::achieved(
            BudgetLineType::Income,
            p.cost_center,
            p.budget.period(),
            &documents,
        );
        prop_assert_eq!(achieved, expected);
    }

    #[test]
    fn prop_amount_to_achieve_never_negative(
        budgeted in 0i64..1_000_000_000,
        achieved in 0i64..1_000_000_000,
    ) {
        let budgeted = Decimal::from(budgeted);
        let achieved = Decimal::from(achieved);

        let remaining =
            AchievementService::amount_to_achieve(BudgetLineType::Income, budgeted, achieved)
                .unwrap();
        prop_assert!(remaining >= Decimal::ZERO);
        prop_assert_eq!(remaining, (budgeted - achieved).max(Decimal::ZERO));
        prop_assert_eq!(
            AchievementService::amount_to_achieve(BudgetLineType::Expense, budgeted, achieved),
            None
        );
    }

    #[test]
    fn prop_achieved_percent(
        budgeted in 1i64..1_000_000_000,
        achieved in 0i64..1_000_000_000,
    ) {
        let budgeted = Decimal::from(budgeted);
        let achieved = Decimal::from(achieved);

        let percent = AchievementService::achieved_percent(achieved, budgeted);
        prop_assert!(percent.scale() <= 2);
        prop_assert!(percent >= Decimal::ZERO);
        if achieved == budgeted {
            prop_assert_eq!(percent, dec!(100));
        }
    }
}

#[test]
fn test_zero_budgeted_percent_is_zero() {
    assert_eq!(
        AchievementService::achieved_percent(dec!(500), Decimal::ZERO),
        Decimal::ZERO
    );
}
