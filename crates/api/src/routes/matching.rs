//! Matching model and legacy rule routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use costwise_core::matching::{MatchCriteria, NewMatchingModel, RuleKind};
use costwise_db::repositories::{CreateLegacyRuleInput, MatchingRepository};
use costwise_shared::types::{ContactId, CostCenterId, MatchingModelId, PartnerTagId, ProductId};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::{AppState, error::failure};

/// Creates the matching routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matching-models", get(list_models).post(create_model))
        .route("/matching-models/best-match", get(best_match))
        .route("/matching-models/{model_id}", get(get_model))
        .route("/matching-models/{model_id}/confirm", post(confirm_model))
        .route("/matching-models/{model_id}/cancel", post(cancel_model))
        .route("/legacy-rules", post(create_legacy_rule))
}

// ============================================================================
// Request Types
// ============================================================================

/// Request body for creating a matching model.
#[derive(Debug, Deserialize)]
pub struct CreateMatchingModelRequest {
    /// Model name.
    pub name: String,
    /// Exact product predicate.
    pub product_id: Option<ProductId>,
    /// Exact partner predicate.
    pub partner_id: Option<ContactId>,
    /// Product category predicate.
    pub product_category: Option<String>,
    /// Partner tag predicate.
    pub partner_tag_id: Option<PartnerTagId>,
    /// Assignment target.
    pub cost_center_id: Option<CostCenterId>,
}

impl From<CreateMatchingModelRequest> for NewMatchingModel {
    fn from(request: CreateMatchingModelRequest) -> Self {
        Self {
            name: request.name,
            criteria: MatchCriteria {
                product_id: request.product_id,
                partner_id: request.partner_id,
                product_category: request.product_category,
                partner_tag_id: request.partner_tag_id,
            },
            cost_center_id: request.cost_center_id,
        }
    }
}

/// Request body for creating a legacy rule.
#[derive(Debug, Deserialize)]
pub struct CreateLegacyRuleRequest {
    /// `product` or `category`.
    pub kind: RuleKind,
    /// Product ID or category name.
    pub value: String,
    /// Target cost center.
    pub cost_center_id: CostCenterId,
}

/// Query parameters for the best match.
#[derive(Debug, Deserialize)]
pub struct BestMatchQuery {
    /// Product of the transaction.
    pub product_id: ProductId,
    /// Partner of the transaction.
    pub contact_id: ContactId,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/matching-models` - List all models.
async fn list_models(State(state): State<AppState>) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    match repo.list_models().await {
        Ok(models) => (StatusCode::OK, Json(json!({ "models": models }))).into_response(),
        Err(e) => failure("list matching models", e),
    }
}

/// POST `/matching-models` - Create a draft model.
async fn create_model(
    State(state): State<AppState>,
    Json(payload): Json<CreateMatchingModelRequest>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    match repo.create_model(payload.into()).await {
        Ok(model) => (StatusCode::CREATED, Json(model)).into_response(),
        Err(e) => failure("create matching model", e),
    }
}

/// GET `/matching-models/{model_id}` - Get one model.
async fn get_model(
    State(state): State<AppState>,
    Path(model_id): Path<MatchingModelId>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    match repo.get_model(model_id).await {
        Ok(model) => (StatusCode::OK, Json(model)).into_response(),
        Err(e) => failure("get matching model", e),
    }
}

/// POST `/matching-models/{model_id}/confirm` - Confirm a draft model.
async fn confirm_model(
    State(state): State<AppState>,
    Path(model_id): Path<MatchingModelId>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    match repo.confirm_model(model_id).await {
        Ok(model) => (StatusCode::OK, Json(model)).into_response(),
        Err(e) => failure("confirm matching model", e),
    }
}

/// POST `/matching-models/{model_id}/cancel` - Cancel a model.
async fn cancel_model(
    State(state): State<AppState>,
    Path(model_id): Path<MatchingModelId>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    match repo.cancel_model(model_id).await {
        Ok(model) => (StatusCode::OK, Json(model)).into_response(),
        Err(e) => failure("cancel matching model", e),
    }
}

/// GET `/matching-models/best-match` - Best confirmed model by specificity.
///
/// Answers `{ "match": null }` when nothing matches or the lookup fails.
async fn best_match(
    State(state): State<AppState>,
    Query(query): Query<BestMatchQuery>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    let found = match repo.best_match(query.product_id, query.contact_id).await {
        Ok(found) => found,
        Err(e) => {
            warn!(
                error = %e,
                product_id = %query.product_id,
                contact_id = %query.contact_id,
                "Best match lookup failed"
            );
            None
        }
    };
    Json(json!({ "match": found }))
}

/// POST `/legacy-rules` - Create a product or category rule.
async fn create_legacy_rule(
    State(state): State<AppState>,
    Json(payload): Json<CreateLegacyRuleRequest>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    let input = CreateLegacyRuleInput {
        kind: payload.kind,
        value: payload.value,
        cost_center_id: payload.cost_center_id,
    };
    match repo.create_legacy_rule(input).await {
        Ok(rule) => (StatusCode::CREATED, Json(rule)).into_response(),
        Err(e) => failure("create legacy rule", e),
    }
}
