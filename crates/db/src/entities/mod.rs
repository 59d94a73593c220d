//! `SeaORM` entity definitions.

pub mod prelude;

pub mod budget_lines;
pub mod budgets;
pub mod contacts;
pub mod cost_centers;
pub mod document_lines;
pub mod documents;
pub mod legacy_rules;
pub mod matching_models;
pub mod partner_tags;
pub mod products;
pub mod sea_orm_active_enums;
pub mod transaction_records;
