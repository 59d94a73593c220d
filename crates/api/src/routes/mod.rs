//! API route definitions.

use axum::{Router, response::Response};
use costwise_core::dashboard::Timeframe;

use crate::{AppState, error::bad_request};

pub mod budgets;
pub mod cost_centers;
pub mod dashboard;
pub mod documents;
pub mod health;
pub mod matching;
pub mod reports;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(cost_centers::routes())
        .merge(matching::routes())
        .merge(documents::routes())
        .merge(budgets::routes())
        .merge(reports::routes())
        .merge(dashboard::routes())
}

/// Parses an optional `timeframe` query value, falling back to the configured default.
fn timeframe_or_default(state: &AppState, raw: Option<&str>) -> Result<Timeframe, Response> {
    match raw {
        None | Some("") => Ok(state.default_timeframe),
        Some(value) => Timeframe::parse(value).map_err(bad_request),
    }
}
