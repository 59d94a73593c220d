//! Budget routes: lifecycle, lines, revision and achievement.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use costwise_core::budget::{NewBudget, NewBudgetLine};
use costwise_db::repositories::BudgetRepository;
use costwise_shared::types::{BudgetId, CostCenterId};
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::failure};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route("/budgets/{budget_id}", get(get_budget))
        .route(
            "/budgets/{budget_id}/lines",
            get(list_budget_lines).post(add_budget_line),
        )
        .route("/budgets/{budget_id}/activate", post(activate_budget))
        .route("/budgets/{budget_id}/confirm", post(confirm_budget))
        .route("/budgets/{budget_id}/cancel", post(cancel_budget))
        .route("/budgets/{budget_id}/revise", post(revise_budget))
        .route("/budgets/{budget_id}/achievement", get(get_achievement))
        .route("/budgets/{budget_id}/revisions", get(list_revisions))
}

/// Query parameters for listing budgets.
#[derive(Debug, Deserialize)]
pub struct ListBudgetsQuery {
    /// Only budgets of this cost center.
    pub cost_center_id: Option<CostCenterId>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/budgets` - List budgets.
async fn list_budgets(
    State(state): State<AppState>,
    Query(query): Query<ListBudgetsQuery>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.list_budgets(query.cost_center_id).await {
        Ok(budgets) => (StatusCode::OK, Json(json!({ "budgets": budgets }))).into_response(),
        Err(e) => failure("list budgets", e),
    }
}

/// POST `/budgets` - Create a draft budget.
async fn create_budget(
    State(state): State<AppState>,
    Json(payload): Json<NewBudget>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.create_budget(payload).await {
        Ok(budget) => (StatusCode::CREATED, Json(budget)).into_response(),
        Err(e) => failure("create budget", e),
    }
}

/// GET `/budgets/{budget_id}` - Get a budget with its lines.
async fn get_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    let budget = match repo.get_budget(budget_id).await {
        Ok(budget) => budget,
        Err(e) => return failure("get budget", e),
    };
    match repo.get_lines(budget_id).await {
        Ok(lines) => (
            StatusCode::OK,
            Json(json!({ "budget": budget, "lines": lines })),
        )
            .into_response(),
        Err(e) => failure("get budget lines", e),
    }
}

/// GET `/budgets/{budget_id}/lines` - List the lines of a budget.
async fn list_budget_lines(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.get_lines(budget_id).await {
        Ok(lines) => (StatusCode::OK, Json(json!({ "lines": lines }))).into_response(),
        Err(e) => failure("list budget lines", e),
    }
}

/// POST `/budgets/{budget_id}/lines` - Add a line to a draft or active budget.
async fn add_budget_line(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
    Json(payload): Json<NewBudgetLine>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.add_line(budget_id, payload).await {
        Ok(line) => (StatusCode::CREATED, Json(line)).into_response(),
        Err(e) => failure("add budget line", e),
    }
}

/// POST `/budgets/{budget_id}/activate`
async fn activate_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.activate(budget_id).await {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(e) => failure("activate budget", e),
    }
}

/// POST `/budgets/{budget_id}/confirm`
async fn confirm_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.confirm(budget_id).await {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(e) => failure("confirm budget", e),
    }
}

/// POST `/budgets/{budget_id}/cancel`
async fn cancel_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.cancel(budget_id).await {
        Ok(budget) => (StatusCode::OK, Json(budget)).into_response(),
        Err(e) => failure("cancel budget", e),
    }
}

/// POST `/budgets/{budget_id}/revise` - Replace a confirmed budget with a draft copy.
///
/// A lost race with another revision answers 409.
async fn revise_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.revise(budget_id).await {
        Ok(revision) => (StatusCode::CREATED, Json(revision)).into_response(),
        Err(e) => failure("revise budget", e),
    }
}

/// GET `/budgets/{budget_id}/achievement` - Achievement per budget line.
///
/// Budgets that are not confirmed or revised answer 200 with a
/// `not_computable` outcome.
async fn get_achievement(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.achievement(budget_id).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => failure("compute achievement", e),
    }
}

/// GET `/budgets/{budget_id}/revisions` - The budget and its predecessors, newest first.
async fn list_revisions(
    State(state): State<AppState>,
    Path(budget_id): Path<BudgetId>,
) -> impl IntoResponse {
    let repo = BudgetRepository::new((*state.db).clone());
    match repo.revisions(budget_id).await {
        Ok(chain) => (StatusCode::OK, Json(json!({ "revisions": chain }))).into_response(),
        Err(e) => failure("list revisions", e),
    }
}
