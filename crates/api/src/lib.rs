//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for matching, documents, budgets, reports and the dashboard
//! - JSON error responses built from `AppError`
//! - Shared application state

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use costwise_core::dashboard::{DashboardError, Timeframe};
use costwise_shared::AppConfig;
use costwise_shared::types::CostCenterId;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Cost center for document lines no legacy rule matches.
    pub fallback_cost_center_id: Option<CostCenterId>,
    /// Timeframe used when a request does not name one.
    pub default_timeframe: Timeframe,
    /// Upper bound on request handling time.
    pub request_timeout: Duration,
}

impl AppState {
    /// Builds the state from a connection and the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `reporting.default_timeframe` is not a known timeframe.
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Result<Self, DashboardError> {
        Ok(Self {
            db: Arc::new(db),
            fallback_cost_center_id: config
                .posting
                .fallback_cost_center_id
                .map(CostCenterId::from_uuid),
            default_timeframe: Timeframe::parse(&config.reporting.default_timeframe)?,
            request_timeout: Duration::from_secs(config.server.request_timeout_secs),
        })
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    let timeout = state.request_timeout;
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
