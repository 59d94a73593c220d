//! Budget report routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use costwise_core::reports::{ReportFormat, ReportService};
use costwise_db::repositories::ReportRepository;
use costwise_shared::AppError;
use costwise_shared::types::CostCenterId;
use serde::Deserialize;

use super::timeframe_or_default;
use crate::{
    AppState,
    error::{bad_request, failure},
};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reports/budget", get(get_budget_report))
}

/// Query parameters for the budget report.
#[derive(Debug, Deserialize)]
pub struct BudgetReportQuery {
    /// Restrict to one cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// `week`, `month` or `year`.
    pub timeframe: Option<String>,
    /// `json` (default) or `csv`.
    pub format: Option<String>,
}

/// GET `/reports/budget` - Achievement rows, KPIs, spend and trend.
///
/// With `format=csv` only the achievement rows are exported.
async fn get_budget_report(
    State(state): State<AppState>,
    Query(query): Query<BudgetReportQuery>,
) -> impl IntoResponse {
    let timeframe = match timeframe_or_default(&state, query.timeframe.as_deref()) {
        Ok(timeframe) => timeframe,
        Err(response) => return response,
    };
    let format = match query.format.as_deref() {
        None | Some("") => ReportFormat::default(),
        Some(raw) => match ReportFormat::parse(raw) {
            Ok(format) => format,
            Err(e) => return bad_request(e),
        },
    };

    let repo = ReportRepository::new((*state.db).clone());
    let snapshot = match repo.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return failure("load report data", e),
    };
    let report =
        ReportService::budget_report(snapshot, query.cost_center_id, timeframe, Utc::now());

    match format {
        ReportFormat::Json => (StatusCode::OK, Json(report)).into_response(),
        ReportFormat::Csv => match ReportService::to_csv(&report) {
            Ok(csv) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=\"budget-report.csv\"",
                    ),
                ],
                csv,
            )
                .into_response(),
            Err(e) => failure("export budget report", AppError::Internal(e.to_string())),
        },
    }
}
