//! Legacy two-tier rule matcher.
//!
//! Used when a document is posted and by the preview endpoint. A product rule
//! always beats a category rule.

use costwise_shared::types::ProductId;

use super::types::{CostCenterAssignment, LegacyRule, RuleKind};
use crate::reference::ReferenceLookup;

/// Legacy rules in creation order.
#[derive(Debug, Clone, Default)]
pub struct LegacyRuleSet {
    rules: Vec<LegacyRule>,
}

impl LegacyRuleSet {
    /// Builds a rule set, sorting rules by creation.
    #[must_use]
    pub fn new(mut rules: Vec<LegacyRule>) -> Self {
        rules.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Self { rules }
    }

    /// Rules of one kind whose value equals `value`, in creation order.
    pub fn matching<'a>(
        &'a self,
        kind: RuleKind,
        value: &'a str,
    ) -> impl Iterator<Item = &'a LegacyRule> + 'a {
        self.rules
            .iter()
            .filter(move |r| r.kind == kind && r.value == value)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Stateless legacy matcher.
pub struct LegacyRuleMatcher;

impl LegacyRuleMatcher {
    /// Finds the cost center for a product.
    ///
    /// 1. A product rule for the product ID.
    /// 2. A category rule for the product's category.
    ///
    /// Rules whose cost center does not resolve are skipped.
    #[must_use]
    pub fn find_cost_center<R: ReferenceLookup>(
        rules: &LegacyRuleSet,
        references: &R,
        product_id: ProductId,
    ) -> Option<CostCenterAssignment> {
        let Some(product) = references.product(product_id) else {
            tracing::debug!(%product_id, "Legacy match skipped: unknown product");
            return None;
        };

        let product_key = product.id.to_string();
        if let Some(assignment) =
            Self::first_resolvable(rules.matching(RuleKind::Product, &product_key), references)
        {
            return Some(assignment);
        }

        let category = product.category.as_deref()?;
        Self::first_resolvable(rules.matching(RuleKind::Category, category), references)
    }

    fn first_resolvable<'a, R: ReferenceLookup>(
        candidates: impl Iterator<Item = &'a LegacyRule>,
        references: &R,
    ) -> Option<CostCenterAssignment> {
        for rule in candidates {
            match references.cost_center(rule.cost_center_id) {
                Some(cost_center) => {
                    return Some(CostCenterAssignment {
                        cost_center_id: cost_center.id,
                        cost_center_name: cost_center.name.clone(),
                    });
                }
                None => tracing::warn!(
                    rule_id = %rule.id,
                    cost_center_id = %rule.cost_center_id,
                    "Legacy rule targets unknown cost center, skipping"
                ),
            }
        }
        None
    }
}
