//! Cost center routes, including the posting-time assignment preview.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use costwise_db::ReferenceRepository;
use costwise_db::repositories::MatchingRepository;
use costwise_shared::types::ProductId;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::{AppState, error::failure};

/// Creates the cost center routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cost-centers", get(list_cost_centers))
        .route("/cost-centers/preview", get(preview_cost_center))
}

/// Query parameters for the preview.
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Product being entered on a document line.
    pub product_id: ProductId,
}

/// GET `/cost-centers` - List all cost centers.
async fn list_cost_centers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = ReferenceRepository::new((*state.db).clone());
    match repo.list_cost_centers().await {
        Ok(cost_centers) => {
            (StatusCode::OK, Json(json!({ "cost_centers": cost_centers }))).into_response()
        }
        Err(e) => failure("list cost centers", e),
    }
}

/// GET `/cost-centers/preview` - Cost center posting would assign to a product.
///
/// Uses the legacy product/category rules. Unknown products and lookup
/// failures both answer with nulls.
async fn preview_cost_center(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> impl IntoResponse {
    let repo = MatchingRepository::new((*state.db).clone());
    let assignment = match repo.preview(query.product_id).await {
        Ok(assignment) => assignment,
        Err(e) => {
            warn!(error = %e, product_id = %query.product_id, "Preview lookup failed");
            None
        }
    };

    let (cost_center_id, cost_center_name) = assignment.map_or((None, None), |a| {
        (Some(a.cost_center_id), Some(a.cost_center_name))
    });
    Json(json!({
        "cost_center_id": cost_center_id,
        "cost_center_name": cost_center_name
    }))
}
