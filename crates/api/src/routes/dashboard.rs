//! Dashboard routes.
//!
//! Every endpoint reads one ledger snapshot. When the snapshot cannot be
//! loaded the figures are computed over an empty ledger.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use costwise_core::dashboard::{DashboardService, LedgerSnapshot, Timeframe, TrendMetric};
use costwise_db::repositories::ReportRepository;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use super::timeframe_or_default;
use crate::{AppState, error::bad_request};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/kpis", get(get_kpis))
        .route("/dashboard/trends", get(get_trends))
        .route("/dashboard/alerts", get(get_alerts))
        .route("/dashboard/cost-centers", get(get_cost_center_spend))
}

/// Query parameters shared by the dashboard endpoints.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// `week`, `month` or `year`.
    pub timeframe: Option<String>,
    /// Trend metric: `spending` (default) or `transaction_volume`.
    pub metric: Option<String>,
}

async fn load(
    state: &AppState,
    query: &DashboardQuery,
) -> Result<(LedgerSnapshot, Timeframe), Response> {
    let timeframe = timeframe_or_default(state, query.timeframe.as_deref())?;
    let snapshot = match ReportRepository::new((*state.db).clone()).snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Dashboard snapshot unavailable, using empty ledger");
            LedgerSnapshot::default()
        }
    };
    Ok((snapshot, timeframe))
}

/// GET `/dashboard/kpis` - Total budget, actual spend, remaining and health.
async fn get_kpis(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    match load(&state, &query).await {
        Ok((snapshot, timeframe)) => {
            Json(DashboardService::kpis(&snapshot, timeframe, Utc::now())).into_response()
        }
        Err(response) => response,
    }
}

/// GET `/dashboard/trends` - Spending or volume per bucket, oldest first.
async fn get_trends(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let metric = match query.metric.as_deref() {
        None | Some("") => TrendMetric::Spending,
        Some(raw) => match TrendMetric::parse(raw) {
            Ok(metric) => metric,
            Err(e) => return bad_request(e),
        },
    };
    match load(&state, &query).await {
        Ok((snapshot, timeframe)) => {
            let series = DashboardService::trend(&snapshot, metric, timeframe, Utc::now());
            Json(series).into_response()
        }
        Err(response) => response,
    }
}

/// GET `/dashboard/alerts` - Budget and portfolio alerts, critical first.
async fn get_alerts(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    match load(&state, &query).await {
        Ok((snapshot, timeframe)) => {
            let alerts = DashboardService::alerts(&snapshot, timeframe, Utc::now());
            Json(json!({ "alerts": alerts })).into_response()
        }
        Err(response) => response,
    }
}

/// GET `/dashboard/cost-centers` - Spend per cost center, largest first.
async fn get_cost_center_spend(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    match load(&state, &query).await {
        Ok((snapshot, timeframe)) => {
            let spend = DashboardService::cost_center_spend(&snapshot, timeframe, Utc::now());
            Json(json!({ "timeframe": timeframe, "cost_centers": spend })).into_response()
        }
        Err(response) => response,
    }
}
