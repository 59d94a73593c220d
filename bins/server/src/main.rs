//! Costwise API Server
//!
//! Main entry point for the cost-center assignment and budget service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use costwise_api::{AppState, create_router};
use costwise_db::connect_with;
use costwise_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "costwise=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    match config.posting.fallback_cost_center_id {
        Some(id) => info!(fallback_cost_center_id = %id, "Posting fallback configured"),
        None => warn!("No posting fallback cost center; unmatched lines stay unassigned"),
    }

    let state = AppState::new(db, &config).context("Invalid reporting configuration")?;
    info!(
        default_timeframe = %state.default_timeframe,
        request_timeout_secs = config.server.request_timeout_secs,
        "Application state ready"
    );

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
