//! Specificity matcher over confirmed analytical models.
//!
//! Each set predicate of a model must agree with the transaction or the model is
//! disqualified. Satisfied predicates add their weight:
//!
//! | Predicate        | Weight |
//! |------------------|--------|
//! | product          | 4      |
//! | partner          | 3      |
//! | product category | 2      |
//! | partner tag      | 1      |
//!
//! The highest score wins; ties keep the model found first in registry order.
//! A model with no predicates scores 0 and is only chosen when nothing else qualifies.

use costwise_shared::types::{ContactId, ProductId};
use serde::Serialize;

use super::registry::ModelRegistry;
use super::types::{MatchCriteria, MatchingModel};
use crate::reference::{Contact, Product, ReferenceLookup};

/// Weight of a satisfied product predicate.
pub const PRODUCT_WEIGHT: u8 = 4;
/// Weight of a satisfied partner predicate.
pub const PARTNER_WEIGHT: u8 = 3;
/// Weight of a satisfied product-category predicate.
pub const CATEGORY_WEIGHT: u8 = 2;
/// Weight of a satisfied partner-tag predicate.
pub const PARTNER_TAG_WEIGHT: u8 = 1;

/// A qualifying model together with its specificity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMatch<'a> {
    /// The matching model.
    pub model: &'a MatchingModel,
    /// Sum of satisfied predicate weights.
    pub score: u8,
}

/// Stateless specificity matcher.
pub struct SpecificityMatcher;

impl SpecificityMatcher {
    /// Scores criteria against a transaction.
    ///
    /// Returns `None` if any set predicate disagrees with the transaction.
    #[must_use]
    pub fn score(criteria: &MatchCriteria, product: &Product, contact: &Contact) -> Option<u8> {
        let mut score = 0;

        if let Some(product_id) = criteria.product_id {
            if product_id != product.id {
                return None;
            }
            score += PRODUCT_WEIGHT;
        }

        if let Some(partner_id) = criteria.partner_id {
            if partner_id != contact.id {
                return None;
            }
            score += PARTNER_WEIGHT;
        }

        if let Some(category) = criteria.product_category.as_deref() {
            if product.category.as_deref() != Some(category) {
                return None;
            }
            score += CATEGORY_WEIGHT;
        }

        if let Some(tag_id) = criteria.partner_tag_id {
            if contact.tag_id != Some(tag_id) {
                return None;
            }
            score += PARTNER_TAG_WEIGHT;
        }

        Some(score)
    }

    /// Returns the best confirmed model for an already-resolved transaction.
    #[must_use]
    pub fn best_match<'a>(
        registry: &'a ModelRegistry,
        product: &Product,
        contact: &Contact,
    ) -> Option<ScoredMatch<'a>> {
        let mut best: Option<ScoredMatch<'a>> = None;

        for model in registry.confirmed() {
            let Some(score) = Self::score(&model.criteria, product, contact) else {
                continue;
            };

            // Strictly greater: ties keep the first found.
            if best.is_none_or(|b| score > b.score) {
                best = Some(ScoredMatch { model, score });
            }
        }

        best
    }

    /// Finds the best confirmed model for a product and contact.
    ///
    /// Returns `None` if either ID does not resolve or no model qualifies.
    #[must_use]
    pub fn find_best_match<'a, R: ReferenceLookup>(
        registry: &'a ModelRegistry,
        references: &R,
        product_id: ProductId,
        contact_id: ContactId,
    ) -> Option<ScoredMatch<'a>> {
        let Some(product) = references.product(product_id) else {
            tracing::debug!(%product_id, "Best match skipped: unknown product");
            return None;
        };
        let Some(contact) = references.contact(contact_id) else {
            tracing::debug!(%contact_id, "Best match skipped: unknown contact");
            return None;
        };

        Self::best_match(registry, product, contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::types::{ModelStatus, NewMatchingModel};
    use crate::reference::{ContactType, ReferenceSet};
    use chrono::{Duration, Utc};
    use costwise_shared::types::{CostCenterId, PartnerTagId};
    use rust_decimal_macros::dec;

    struct Fixture {
        product: Product,
        contact: Contact,
        tag: PartnerTagId,
    }

    fn fixture() -> Fixture {
        let tag = PartnerTagId::new();
        Fixture {
            product: Product::new("Steel Sheet", Some("Raw".to_string()), dec!(120), None)
                .unwrap(),
            contact: Contact::new("Acme", ContactType::Customer, Some(tag)).unwrap(),
            tag,
        }
    }

    fn confirmed(name: &str, criteria: MatchCriteria, order: i64) -> MatchingModel {
        let mut model = MatchingModel::new(
            NewMatchingModel {
                name: name.to_string(),
                criteria,
                cost_center_id: Some(CostCenterId::new()),
            },
            Utc::now() + Duration::seconds(order),
        )
        .unwrap();
        model.status = ModelStatus::Confirmed;
        model
    }

    #[test]
    fn test_score_all_predicates() {
        let f = fixture();
        let criteria = MatchCriteria::any()
            .with_product(f.product.id)
            .with_partner(f.contact.id)
            .with_category("Raw")
            .with_partner_tag(f.tag);

        assert_eq!(
            SpecificityMatcher::score(&criteria, &f.product, &f.contact),
            Some(10)
        );
    }

    #[test]
    fn test_score_empty_criteria_is_zero() {
        let f = fixture();
        assert_eq!(
            SpecificityMatcher::score(&MatchCriteria::any(), &f.product, &f.contact),
            Some(0)
        );
    }

    #[test]
    fn test_failed_predicate_disqualifies() {
        let f = fixture();
        let criteria = MatchCriteria::any()
            .with_product(f.product.id)
            .with_category("Finished Goods");

        assert_eq!(
            SpecificityMatcher::score(&criteria, &f.product, &f.contact),
            None
        );
    }

    #[test]
    fn test_category_predicate_needs_product_category() {
        let f = fixture();
        let uncategorized = Product::new("Service", None, dec!(10), None).unwrap();
        let criteria = MatchCriteria::any().with_category("Raw");

        assert_eq!(
            SpecificityMatcher::score(&criteria, &uncategorized, &f.contact),
            None
        );
    }

    #[test]
    fn test_tag_predicate_needs_contact_tag() {
        let f = fixture();
        let untagged = Contact::new("Walk-in", ContactType::Customer, None).unwrap();
        let criteria = MatchCriteria::any().with_partner_tag(f.tag);

        assert_eq!(
            SpecificityMatcher::score(&criteria, &f.product, &untagged),
            None
        );
    }

    #[test]
    fn test_more_specific_model_wins() {
        let f = fixture();
        let category_only = confirmed("category", MatchCriteria::any().with_category("Raw"), 0);
        let full = confirmed(
            "full",
            MatchCriteria::any()
                .with_product(f.product.id)
                .with_partner(f.contact.id)
                .with_category("Raw")
                .with_partner_tag(f.tag),
            1,
        );
        let registry = ModelRegistry::new(vec![category_only, full]);

        let best = SpecificityMatcher::best_match(&registry, &f.product, &f.contact).unwrap();
        assert_eq!(best.model.name, "full");
        assert_eq!(best.score, 10);
    }

    #[test]
    fn test_partner_ties_category_plus_tag() {
        let f = fixture();
        let category_and_tag = confirmed(
            "category+tag",
            MatchCriteria::any().with_category("Raw").with_partner_tag(f.tag),
            0,
        );
        let partner = confirmed("partner", MatchCriteria::any().with_partner(f.contact.id), 1);
        let registry = ModelRegistry::new(vec![category_and_tag, partner]);

        let best = SpecificityMatcher::best_match(&registry, &f.product, &f.contact).unwrap();
        assert_eq!(best.model.name, "category+tag");
        assert_eq!(best.score, 3);
    }

    #[test]
    fn test_tie_keeps_first_in_registry_order() {
        let f = fixture();
        let first = confirmed("first", MatchCriteria::any().with_category("Raw"), 0);
        let second = confirmed("second", MatchCriteria::any().with_category("Raw"), 5);
        let registry = ModelRegistry::new(vec![second, first]);

        let best = SpecificityMatcher::best_match(&registry, &f.product, &f.contact).unwrap();
        assert_eq!(best.model.name, "first");
    }

    #[test]
    fn test_catch_all_model_is_fallback() {
        let f = fixture();
        let catch_all = confirmed("catch-all", MatchCriteria::any(), 0);
        let registry = ModelRegistry::new(vec![catch_all.clone()]);

        let best = SpecificityMatcher::best_match(&registry, &f.product, &f.contact).unwrap();
        assert_eq!(best.model.name, "catch-all");
        assert_eq!(best.score, 0);

        let tag_only = confirmed("tag", MatchCriteria::any().with_partner_tag(f.tag), 1);
        let registry = ModelRegistry::new(vec![catch_all, tag_only]);
        let best = SpecificityMatcher::best_match(&registry, &f.product, &f.contact).unwrap();
        assert_eq!(best.model.name, "tag");
    }

    #[test]
    fn test_draft_and_cancelled_models_ignored() {
        let f = fixture();
        let mut draft = confirmed("draft", MatchCriteria::any().with_product(f.product.id), 0);
        draft.status = ModelStatus::Draft;
        let mut cancelled =
            confirmed("cancelled", MatchCriteria::any().with_product(f.product.id), 1);
        cancelled.status = ModelStatus::Cancelled;
        let registry = ModelRegistry::new(vec![draft, cancelled]);

        assert!(SpecificityMatcher::best_match(&registry, &f.product, &f.contact).is_none());
    }

    #[test]
    fn test_find_best_match_unknown_ids() {
        let f = fixture();
        let registry = ModelRegistry::new(vec![confirmed("any", MatchCriteria::any(), 0)]);
        let references = ReferenceSet::new()
            .with_product(f.product.clone())
            .with_contact(f.contact.clone());

        assert!(
            SpecificityMatcher::find_best_match(
                &registry,
                &references,
                f.product.id,
                ContactId::new()
            )
            .is_none()
        );
        assert!(
            SpecificityMatcher::find_best_match(
                &registry,
                &references,
                ProductId::new(),
                f.contact.id
            )
            .is_none()
        );
        assert!(
            SpecificityMatcher::find_best_match(&registry, &references, f.product.id, f.contact.id)
                .is_some()
        );
    }
}
