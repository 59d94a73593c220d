//! Budget report generation.
//!
//! This module combines achievement and dashboard figures into one report:
//! - Achievement rows per budget line
//! - Budgets pending confirmation
//! - KPIs, spend per cost center, and the spending trend
//! - CSV export of the rows

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
