//! Snapshot reads for the dashboard and the budget report.

use costwise_core::dashboard::LedgerSnapshot;
use costwise_core::documents::DocumentStatus;
use sea_orm::{AccessMode, DatabaseConnection, IsolationLevel, TransactionTrait};

use super::budget::BudgetRepository;
use super::document::DocumentRepository;
use super::error::RepositoryError;
use super::matching::MatchingRepository;
use super::reference::ReferenceRepository;

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads budgets, lines, posted documents, models and cost centers from
    /// a single repeatable-read transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn snapshot(&self) -> Result<LedgerSnapshot, RepositoryError> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let budgets = BudgetRepository::load_budgets(&txn).await?;
        let budget_lines = BudgetRepository::load_lines(&txn).await?;
        let documents = DocumentRepository::load_with_status(&txn, DocumentStatus::Posted).await?;
        let models = MatchingRepository::load_registry(&txn).await?;
        let cost_centers = ReferenceRepository::load_cost_centers(&txn).await?;
        txn.commit().await?;

        tracing::debug!(
            budgets = budgets.len(),
            budget_lines = budget_lines.len(),
            documents = documents.len(),
            "Ledger snapshot loaded"
        );

        Ok(LedgerSnapshot {
            budgets,
            budget_lines,
            documents,
            models,
            cost_centers,
        })
    }
}
