//! Budget repository for budget database operations.
//!
//! Status changes are compare-and-set updates on the current status, so two
//! writers racing on the same budget cannot both succeed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use costwise_core::budget::{
    AchievementOutcome, AchievementService, Budget, BudgetError, BudgetLine, BudgetService,
    BudgetStatus, NewBudget, NewBudgetLine, Revision,
};
use costwise_core::documents::DocumentStatus;
use costwise_core::matching::MatchingError;
use costwise_shared::types::{BudgetId, CostCenterId};
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, IsolationLevel, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::document::DocumentRepository;
use super::error::RepositoryError;
use super::matching::MatchingRepository;
use crate::entities::{
    budget_lines, budgets, cost_centers, matching_models,
    sea_orm_active_enums::BudgetStatus as DbBudgetStatus,
};

/// Budget repository.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every budget ordered by creation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_budgets<C: ConnectionTrait>(conn: &C) -> Result<Vec<Budget>, DbErr> {
        let rows = budgets::Entity::find()
            .order_by_asc(budgets::Column::CreatedAt)
            .order_by_asc(budgets::Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    /// Loads confirmed budgets, the candidates for transaction records.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_confirmed<C: ConnectionTrait>(conn: &C) -> Result<Vec<Budget>, DbErr> {
        let rows = budgets::Entity::find()
            .filter(budgets::Column::Status.eq(DbBudgetStatus::Confirmed))
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    /// Loads every budget line.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_lines<C: ConnectionTrait>(conn: &C) -> Result<Vec<BudgetLine>, DbErr> {
        let rows = budget_lines::Entity::find()
            .order_by_asc(budget_lines::Column::CreatedAt)
            .order_by_asc(budget_lines::Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(BudgetLine::from).collect())
    }

    async fn find<C: ConnectionTrait>(conn: &C, id: BudgetId) -> Result<Budget, RepositoryError> {
        budgets::Entity::find_by_id(id.into_inner())
            .one(conn)
            .await?
            .map(Budget::from)
            .ok_or_else(|| BudgetError::NotFound(id).into())
    }

    async fn lines_of<C: ConnectionTrait>(
        conn: &C,
        id: BudgetId,
    ) -> Result<Vec<BudgetLine>, DbErr> {
        let rows = budget_lines::Entity::find()
            .filter(budget_lines::Column::BudgetId.eq(id.into_inner()))
            .order_by_asc(budget_lines::Column::CreatedAt)
            .order_by_asc(budget_lines::Column::Id)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(BudgetLine::from).collect())
    }

    /// Creates a draft budget.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the cost center does not exist,
    /// or the insert fails.
    pub async fn create_budget(&self, input: NewBudget) -> Result<Budget, RepositoryError> {
        let budget = Budget::new(input, Utc::now())?;

        cost_centers::Entity::find_by_id(budget.cost_center_id.into_inner())
            .one(&self.db)
            .await?
            .ok_or_else(|| RepositoryError::missing("Cost center", budget.cost_center_id))?;

        budgets::ActiveModel::from(&budget).insert(&self.db).await?;

        tracing::info!(
            budget_id = %budget.id,
            name = %budget.name,
            cost_center_id = %budget.cost_center_id,
            amount = %budget.amount,
            "Budget created"
        );
        Ok(budget)
    }

    /// Gets a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if it does not exist.
    pub async fn get_budget(&self, id: BudgetId) -> Result<Budget, RepositoryError> {
        Self::find(&self.db, id).await
    }

    /// Lists budgets, optionally for one cost center.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_budgets(
        &self,
        cost_center_id: Option<CostCenterId>,
    ) -> Result<Vec<Budget>, RepositoryError> {
        let mut query = budgets::Entity::find();
        if let Some(id) = cost_center_id {
            query = query.filter(budgets::Column::CostCenterId.eq(id.into_inner()));
        }
        let rows = query
            .order_by_asc(budgets::Column::CreatedAt)
            .order_by_asc(budgets::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    /// Lists the lines of a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget does not exist or the query fails.
    pub async fn get_lines(&self, id: BudgetId) -> Result<Vec<BudgetLine>, RepositoryError> {
        Self::find(&self.db, id).await?;
        Ok(Self::lines_of(&self.db, id).await?)
    }

    /// Adds a line to a draft or active budget.
    ///
    /// The budget row is locked for the duration so a concurrent confirm
    /// cannot slip in between the status check and the insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget no longer accepts lines, the model does
    /// not exist, or the insert fails.
    pub async fn add_line(
        &self,
        id: BudgetId,
        input: NewBudgetLine,
    ) -> Result<BudgetLine, RepositoryError> {
        let txn = self.db.begin().await?;

        let budget = budgets::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(&txn)
            .await?
            .map(Budget::from)
            .ok_or(BudgetError::NotFound(id))?;

        matching_models::Entity::find_by_id(input.matching_model_id.into_inner())
            .one(&txn)
            .await?
            .ok_or(MatchingError::ModelNotFound(input.matching_model_id))?;

        let line = BudgetLine::new(&budget, input, Utc::now())?;
        budget_lines::ActiveModel::from(&line).insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            budget_id = %id,
            line_id = %line.id,
            line_type = line.line_type.as_str(),
            budgeted = %line.budgeted_amount,
            "Budget line added"
        );
        Ok(line)
    }

    /// Moves a draft budget to active.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn activate(&self, id: BudgetId) -> Result<Budget, RepositoryError> {
        self.transition(id, BudgetService::activate).await
    }

    /// Confirms a draft or active budget.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn confirm(&self, id: BudgetId) -> Result<Budget, RepositoryError> {
        self.transition(id, BudgetService::confirm).await
    }

    /// Cancels a draft, active or confirmed budget.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn cancel(&self, id: BudgetId) -> Result<Budget, RepositoryError> {
        self.transition(id, BudgetService::cancel).await
    }

    async fn transition<F>(&self, id: BudgetId, apply: F) -> Result<Budget, RepositoryError>
    where
        F: FnOnce(&mut Budget, DateTime<Utc>) -> Result<(), BudgetError>,
    {
        let mut budget = Self::find(&self.db, id).await?;
        let from = budget.status;
        apply(&mut budget, Utc::now())?;

        let updated = Self::compare_and_set(&self.db, &budget, from).await?;
        if !updated {
            return Err(RepositoryError::Conflict(format!(
                "budget {id} changed status concurrently"
            )));
        }

        tracing::info!(budget_id = %id, %from, to = %budget.status, "Budget status changed");
        Ok(budget)
    }

    /// Writes `budget.status` only if the row still has status `from`.
    async fn compare_and_set<C: ConnectionTrait>(
        conn: &C,
        budget: &Budget,
        from: BudgetStatus,
    ) -> Result<bool, DbErr> {
        let result = budgets::Entity::update_many()
            .set(budgets::ActiveModel {
                status: Set(budget.status.into()),
                updated_at: Set(budget.updated_at.into()),
                ..Default::default()
            })
            .filter(budgets::Column::Id.eq(budget.id.into_inner()))
            .filter(budgets::Column::Status.eq(DbBudgetStatus::from(from)))
            .exec(conn)
            .await?;
        Ok(result.rows_affected == 1)
    }

    /// Revises a confirmed budget.
    ///
    /// In one transaction: flips the original from confirmed to revised,
    /// inserts a draft clone linked through `revised_from_id`, and copies every
    /// line. If another revision won the race the flip affects no row and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotRevisable` unless the budget is confirmed, or
    /// `BudgetError::RevisionConflict` if a concurrent revision won.
    pub async fn revise(&self, id: BudgetId) -> Result<Revision, RepositoryError> {
        let txn = self.db.begin().await?;

        let mut original = Self::find(&txn, id).await?;
        let lines = Self::lines_of(&txn, id).await?;
        let revision = BudgetService::revise(&mut original, &lines, Utc::now())?;

        if !Self::compare_and_set(&txn, &original, BudgetStatus::Confirmed).await? {
            txn.rollback().await?;
            tracing::warn!(budget_id = %id, "Revision lost to a concurrent writer");
            return Err(BudgetError::RevisionConflict(id).into());
        }

        budgets::ActiveModel::from(&revision.budget)
            .insert(&txn)
            .await?;
        if !revision.lines.is_empty() {
            budget_lines::Entity::insert_many(
                revision.lines.iter().map(budget_lines::ActiveModel::from),
            )
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        tracing::info!(
            budget_id = %id,
            revision_id = %revision.budget.id,
            lines = revision.lines.len(),
            "Budget revised"
        );
        Ok(revision)
    }

    /// Lists a budget and its predecessors, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget does not exist, the chain loops, or the
    /// query fails.
    pub async fn revisions(&self, id: BudgetId) -> Result<Vec<Budget>, RepositoryError> {
        let start = Self::find(&self.db, id).await?;
        let all: HashMap<BudgetId, Budget> = Self::load_budgets(&self.db)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        let chain = BudgetService::revision_chain(&start, |parent| all.get(&parent))?;
        Ok(chain.into_iter().cloned().collect())
    }

    /// Computes achievement for every line of a budget.
    ///
    /// Reads the budget, its lines, the models and the posted documents in one
    /// read-only snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget does not exist or a query fails.
    pub async fn achievement(&self, id: BudgetId) -> Result<AchievementOutcome, RepositoryError> {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await?;

        let budget = Self::find(&txn, id).await?;
        let lines = Self::lines_of(&txn, id).await?;
        let models = MatchingRepository::load_registry(&txn).await?;
        let documents =
            DocumentRepository::load_with_status(&txn, DocumentStatus::Posted).await?;
        txn.commit().await?;

        Ok(AchievementService::budget_achievement(
            &budget, &lines, &models, &documents,
        ))
    }
}
