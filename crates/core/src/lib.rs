//! Core business logic for Costwise.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `reference` - Products, contacts, partner tags, and cost centers
//! - `matching` - Analytical models, legacy rules, and cost-center resolution
//! - `budget` - Budget lifecycle, revision, and achievement
//! - `documents` - Financial documents and posting
//! - `dashboard` - KPIs, health classification, trends, and alerts
//! - `reports` - Budget report assembly over a ledger snapshot

pub mod budget;
pub mod dashboard;
pub mod documents;
pub mod matching;
pub mod percent;
pub mod reference;
pub mod reports;
