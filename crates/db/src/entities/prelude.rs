//! Entity re-exports.

pub use super::budget_lines::Entity as BudgetLines;
pub use super::budgets::Entity as Budgets;
pub use super::contacts::Entity as Contacts;
pub use super::cost_centers::Entity as CostCenters;
pub use super::document_lines::Entity as DocumentLines;
pub use super::documents::Entity as Documents;
pub use super::legacy_rules::Entity as LegacyRules;
pub use super::matching_models::Entity as MatchingModels;
pub use super::partner_tags::Entity as PartnerTags;
pub use super::products::Entity as Products;
pub use super::transaction_records::Entity as TransactionRecords;
