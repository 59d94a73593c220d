//! Matching model and legacy rule repository.
//!
//! Also serves the two read-only matching queries: the specificity best match
//! and the legacy preview used by document entry.

use chrono::Utc;
use costwise_core::matching::{
    CostCenterAssignment, LegacyRule, LegacyRuleMatcher, LegacyRuleSet, MatchingError,
    MatchingModel, ModelRegistry, ModelStatus, NewMatchingModel, RuleKind, SpecificityResolver,
};
use costwise_shared::types::{ContactId, CostCenterId, MatchingModelId, ProductId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use super::error::RepositoryError;
use super::reference::ReferenceRepository;
use crate::entities::{
    cost_centers, legacy_rules, matching_models, products,
    sea_orm_active_enums::ModelStatus as DbModelStatus,
};

/// Input for creating a legacy rule.
#[derive(Debug, Clone)]
pub struct CreateLegacyRuleInput {
    /// Product or category rule.
    pub kind: RuleKind,
    /// Product ID or category name.
    pub value: String,
    /// Target cost center.
    pub cost_center_id: CostCenterId,
}

/// Result of a specificity best-match query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestMatch {
    /// Winning model.
    pub matching_model_id: MatchingModelId,
    /// Winning model name.
    pub matching_model_name: String,
    /// Sum of satisfied predicate weights.
    pub score: u8,
    /// Target cost center.
    pub cost_center_id: CostCenterId,
    /// Target cost center name.
    pub cost_center_name: String,
}

/// Matching repository.
#[derive(Debug, Clone)]
pub struct MatchingRepository {
    db: DatabaseConnection,
}

impl MatchingRepository {
    /// Creates a new matching repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every model in registry order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_registry<C: ConnectionTrait>(conn: &C) -> Result<ModelRegistry, DbErr> {
        let rows = matching_models::Entity::find()
            .order_by_asc(matching_models::Column::CreatedAt)
            .order_by_asc(matching_models::Column::Id)
            .all(conn)
            .await?;
        Ok(ModelRegistry::new(
            rows.into_iter().map(MatchingModel::from).collect(),
        ))
    }

    /// Loads every legacy rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_rules<C: ConnectionTrait>(conn: &C) -> Result<LegacyRuleSet, DbErr> {
        let rows = legacy_rules::Entity::find().all(conn).await?;
        Ok(LegacyRuleSet::new(
            rows.into_iter().map(LegacyRule::from).collect(),
        ))
    }

    async fn ensure_cost_center(&self, id: CostCenterId) -> Result<(), RepositoryError> {
        let exists = cost_centers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .is_some();
        if exists {
            Ok(())
        } else {
            Err(MatchingError::CostCenterNotFound(id).into())
        }
    }

    /// Creates a draft matching model.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the cost center does not exist,
    /// or the insert fails.
    pub async fn create_model(
        &self,
        input: NewMatchingModel,
    ) -> Result<MatchingModel, RepositoryError> {
        let model = MatchingModel::new(input, Utc::now())?;
        self.ensure_cost_center(model.cost_center_id).await?;

        matching_models::ActiveModel::from(&model)
            .insert(&self.db)
            .await?;

        tracing::info!(
            model_id = %model.id,
            name = %model.name,
            predicates = model.criteria.len(),
            cost_center_id = %model.cost_center_id,
            "Matching model created"
        );
        Ok(model)
    }

    /// Gets a model by ID.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError::ModelNotFound` if it does not exist.
    pub async fn get_model(&self, id: MatchingModelId) -> Result<MatchingModel, RepositoryError> {
        matching_models::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(MatchingModel::from)
            .ok_or_else(|| MatchingError::ModelNotFound(id).into())
    }

    /// Lists all models in registry order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_models(&self) -> Result<Vec<MatchingModel>, RepositoryError> {
        let registry = Self::load_registry(&self.db).await?;
        Ok(registry.iter().cloned().collect())
    }

    /// Confirms a draft model.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn confirm_model(
        &self,
        id: MatchingModelId,
    ) -> Result<MatchingModel, RepositoryError> {
        self.transition(id, ModelStatus::Confirmed).await
    }

    /// Cancels a draft or confirmed model.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn cancel_model(
        &self,
        id: MatchingModelId,
    ) -> Result<MatchingModel, RepositoryError> {
        self.transition(id, ModelStatus::Cancelled).await
    }

    async fn transition(
        &self,
        id: MatchingModelId,
        to: ModelStatus,
    ) -> Result<MatchingModel, RepositoryError> {
        let mut model = self.get_model(id).await?;
        let from = model.status;
        model.status = from.transition_to(to)?;

        let result = matching_models::Entity::update_many()
            .set(matching_models::ActiveModel {
                status: Set(model.status.into()),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(matching_models::Column::Id.eq(id.into_inner()))
            .filter(matching_models::Column::Status.eq(DbModelStatus::from(from)))
            .exec(&self.db)
            .await?;

        if result.rows_affected != 1 {
            return Err(RepositoryError::Conflict(format!(
                "matching model {id} changed status concurrently"
            )));
        }

        tracing::info!(
            model_id = %id,
            %from,
            to = %model.status,
            "Matching model status changed"
        );
        Ok(model)
    }

    /// Creates a legacy rule.
    ///
    /// A product rule's value must be the ID of an existing product.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is invalid, a referenced record does not
    /// exist, or the insert fails.
    pub async fn create_legacy_rule(
        &self,
        input: CreateLegacyRuleInput,
    ) -> Result<LegacyRule, RepositoryError> {
        self.ensure_cost_center(input.cost_center_id).await?;
        let now = Utc::now();

        let rule = match input.kind {
            RuleKind::Product => {
                let product_id: ProductId = input
                    .value
                    .trim()
                    .parse()
                    .map_err(|_| MatchingError::UnknownValue(input.value.clone()))?;
                products::Entity::find_by_id(product_id.into_inner())
                    .one(&self.db)
                    .await?
                    .ok_or_else(|| RepositoryError::missing("Product", product_id))?;
                LegacyRule::for_product(product_id, input.cost_center_id, now)
            }
            RuleKind::Category => {
                LegacyRule::for_category(input.value, input.cost_center_id, now)?
            }
        };

        legacy_rules::ActiveModel::from(&rule)
            .insert(&self.db)
            .await?;

        tracing::info!(
            rule_id = %rule.id,
            kind = rule.kind.as_str(),
            value = %rule.value,
            cost_center_id = %rule.cost_center_id,
            "Legacy rule created"
        );
        Ok(rule)
    }

    /// Finds the best confirmed model for a product and contact.
    ///
    /// Unknown products or contacts yield `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub async fn best_match(
        &self,
        product_id: ProductId,
        contact_id: ContactId,
    ) -> Result<Option<BestMatch>, RepositoryError> {
        let references = ReferenceRepository::load(&self.db).await?;
        let registry = Self::load_registry(&self.db).await?;

        let resolver = SpecificityResolver::new(&registry, &references);
        let Some(resolved) = resolver.resolve_scored(product_id, contact_id) else {
            tracing::debug!(%product_id, %contact_id, "No best match");
            return Ok(None);
        };

        let model = resolved.matched.model;
        Ok(Some(BestMatch {
            matching_model_id: model.id,
            matching_model_name: model.name.clone(),
            score: resolved.matched.score,
            cost_center_id: resolved.assignment.cost_center_id,
            cost_center_name: resolved.assignment.cost_center_name,
        }))
    }

    /// Previews the cost center posting would assign to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails.
    pub async fn preview(
        &self,
        product_id: ProductId,
    ) -> Result<Option<CostCenterAssignment>, RepositoryError> {
        let references = ReferenceRepository::load(&self.db).await?;
        let rules = Self::load_rules(&self.db).await?;
        Ok(LegacyRuleMatcher::find_cost_center(
            &rules,
            &references,
            product_id,
        ))
    }
}
