//! Document entry, posting and payment routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use costwise_core::documents::NewDocument;
use costwise_db::repositories::DocumentRepository;
use costwise_shared::types::DocumentId;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, error::failure};

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", post(create_document))
        .route("/documents/{document_id}", get(get_document))
        .route("/documents/{document_id}/post", post(post_document))
        .route("/documents/{document_id}/cancel", post(cancel_document))
        .route("/documents/{document_id}/payments", post(record_payment))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    /// Whether the document is now settled in full.
    #[serde(default)]
    pub fully_paid: bool,
}

/// POST `/documents` - Create a draft document.
async fn create_document(
    State(state): State<AppState>,
    Json(payload): Json<NewDocument>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());
    match repo.create_document(payload).await {
        Ok(document) => (StatusCode::CREATED, Json(document)).into_response(),
        Err(e) => failure("create document", e),
    }
}

/// GET `/documents/{document_id}` - Get a document with its transaction records.
async fn get_document(
    State(state): State<AppState>,
    Path(document_id): Path<DocumentId>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());
    match repo.get_document(document_id).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => failure("get document", e),
    }
}

/// POST `/documents/{document_id}/post` - Post a document.
///
/// Lines are assigned through the legacy rules with the configured fallback.
async fn post_document(
    State(state): State<AppState>,
    Path(document_id): Path<DocumentId>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());
    match repo.post(document_id, state.fallback_cost_center_id).await {
        Ok(plan) => (
            StatusCode::OK,
            Json(json!({
                "document": plan.posted.document,
                "records": plan.posted.records,
                "generated_invoice": plan.generated_invoice
            })),
        )
            .into_response(),
        Err(e) => failure("post document", e),
    }
}

/// POST `/documents/{document_id}/cancel` - Cancel an open document.
async fn cancel_document(
    State(state): State<AppState>,
    Path(document_id): Path<DocumentId>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());
    match repo.cancel(document_id).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => failure("cancel document", e),
    }
}

/// POST `/documents/{document_id}/payments` - Record partial or full payment.
async fn record_payment(
    State(state): State<AppState>,
    Path(document_id): Path<DocumentId>,
    Json(payload): Json<RecordPaymentRequest>,
) -> impl IntoResponse {
    let repo = DocumentRepository::new((*state.db).clone());
    match repo.record_payment(document_id, payload.fully_paid).await {
        Ok(document) => (StatusCode::OK, Json(document)).into_response(),
        Err(e) => failure("record payment", e),
    }
}
