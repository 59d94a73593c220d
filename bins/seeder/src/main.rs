//! Demo data seeder for Costwise development.
//!
//! Seeds a Manufacturing cost center with a confirmed budget whose income line
//! is half achieved by one posted customer invoice, plus a Sales cost center
//! with a vendor bill so the dashboard has spend to show.
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, bail};
use chrono::{Duration, Utc};
use costwise_core::budget::{AchievementOutcome, BudgetLineType, NewBudget, NewBudgetLine};
use costwise_core::documents::{DocumentType, NewDocument, NewDocumentLine};
use costwise_core::matching::{MatchCriteria, NewMatchingModel, RuleKind};
use costwise_core::reference::ContactType;
use costwise_db::repositories::{
    BudgetRepository, CreateLegacyRuleInput, CreateProductInput, DocumentRepository,
    MatchingRepository, ReferenceRepository,
};
use rust_decimal::Decimal;
use tracing::info;

const MANUFACTURING: &str = "Manufacturing";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;
    let db = costwise_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let references = ReferenceRepository::new(db.clone());
    let matching = MatchingRepository::new(db.clone());
    let budgets = BudgetRepository::new(db.clone());
    let documents = DocumentRepository::new(db.clone());

    if references
        .list_cost_centers()
        .await?
        .iter()
        .any(|c| c.name == MANUFACTURING)
    {
        info!("Demo data already present, skipping");
        return Ok(());
    }

    info!("Seeding reference data");
    let manufacturing = references.create_cost_center(MANUFACTURING).await?;
    let sales = references.create_cost_center("Sales").await?;
    let wholesale = references.create_partner_tag("Wholesale").await?;
    let customer = references
        .create_contact("Northwind Traders", ContactType::Customer, Some(wholesale.id))
        .await?;
    let vendor = references
        .create_contact("Contoso Steel", ContactType::Vendor, None)
        .await?;
    let lathe = references
        .create_product(CreateProductInput {
            name: "CNC Lathe".to_string(),
            category: Some("Machinery".to_string()),
            price: Decimal::from(41_000),
            vendor_id: Some(vendor.id),
        })
        .await?;
    let brochure = references
        .create_product(CreateProductInput {
            name: "Trade Brochure".to_string(),
            category: Some("Marketing".to_string()),
            price: Decimal::from(250),
            vendor_id: Some(vendor.id),
        })
        .await?;

    info!("Seeding matching models and legacy rules");
    let machinery = matching
        .create_model(NewMatchingModel {
            name: "Machinery".to_string(),
            criteria: MatchCriteria::any().with_category("Machinery"),
            cost_center_id: Some(manufacturing.id),
        })
        .await?;
    matching.confirm_model(machinery.id).await?;
    for (category, cost_center_id) in [("Machinery", manufacturing.id), ("Marketing", sales.id)] {
        matching
            .create_legacy_rule(CreateLegacyRuleInput {
                kind: RuleKind::Category,
                value: category.to_string(),
                cost_center_id,
            })
            .await?;
    }

    info!("Seeding budget");
    let today = Utc::now().date_naive();
    let budget = budgets
        .create_budget(NewBudget {
            name: "Manufacturing Quarter".to_string(),
            cost_center_id: manufacturing.id,
            amount: Decimal::from(500_000),
            start_date: today - Duration::days(45),
            end_date: today + Duration::days(45),
        })
        .await?;
    budgets
        .add_line(
            budget.id,
            NewBudgetLine {
                matching_model_id: machinery.id,
                line_type: BudgetLineType::Income,
                budgeted_amount: Decimal::from(200_000),
            },
        )
        .await?;
    budgets.confirm(budget.id).await?;

    info!("Seeding documents");
    let invoice = documents
        .create_document(NewDocument {
            document_type: DocumentType::CustomerInvoice,
            contact_id: customer.id,
            cost_center_id: None,
            awaiting_vendor: false,
            lines: vec![NewDocumentLine {
                product_id: lathe.id,
                quantity: Decimal::from(2),
                unit_price: lathe.price,
            }],
        })
        .await?;
    documents.post(invoice.id, None).await?;

    let bill = documents
        .create_document(NewDocument {
            document_type: DocumentType::VendorBill,
            contact_id: vendor.id,
            cost_center_id: None,
            awaiting_vendor: false,
            lines: vec![NewDocumentLine {
                product_id: brochure.id,
                quantity: Decimal::from(40),
                unit_price: brochure.price,
            }],
        })
        .await?;
    documents.post(bill.id, None).await?;

    match budgets.achievement(budget.id).await? {
        AchievementOutcome::Computed(achievement) => {
            for line in &achievement.lines {
                info!(
                    budget = %achievement.budget_name,
                    achieved = %line.achieved,
                    achieved_percent = %line.achieved_percent,
                    amount_to_achieve = ?line.amount_to_achieve,
                    "Seeded achievement"
                );
            }
        }
        AchievementOutcome::NotComputable { budget_status, .. } => {
            bail!("seeded budget is {budget_status}, expected confirmed");
        }
    }

    info!("Seeding complete");
    Ok(())
}
