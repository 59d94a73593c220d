//! Dashboard aggregations.
//!
//! This module computes dashboard data from a [`LedgerSnapshot`]:
//! - Portfolio KPIs and health
//! - Spending and transaction-volume trends
//! - Budget alerts
//! - Spend per cost center

pub mod alerts;
pub mod error;
pub mod health;
pub mod service;
pub mod snapshot;
pub mod trend;
pub mod types;


pub use error::DashboardError;
pub use health::classify_health;
pub use service::DashboardService;
pub use snapshot::LedgerSnapshot;
pub use types::*;
