//! Strategy seam for cost-center assignment.

use costwise_shared::types::{ContactId, ProductId};

use super::legacy::{LegacyRuleMatcher, LegacyRuleSet};
use super::registry::ModelRegistry;
use super::specificity::{ScoredMatch, SpecificityMatcher};
use super::types::CostCenterAssignment;
use crate::reference::ReferenceLookup;

/// Resolves the cost center for a transaction line.
///
/// Implementations never fail; an unresolvable line yields `None`.
pub trait CostCenterResolver {
    /// Short strategy name for logs.
    fn name(&self) -> &'static str;

    /// Resolves the cost center for a product sold to or bought from a contact.
    fn resolve(&self, product_id: ProductId, contact_id: ContactId)
    -> Option<CostCenterAssignment>;
}

/// A specificity match whose target cost center resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMatch<'a> {
    /// Winning model and its score.
    pub matched: ScoredMatch<'a>,
    /// The model's cost center.
    pub assignment: CostCenterAssignment,
}

/// Weighted best match over confirmed analytical models.
pub struct SpecificityResolver<'a, R> {
    registry: &'a ModelRegistry,
    references: &'a R,
}

impl<'a, R: ReferenceLookup> SpecificityResolver<'a, R> {
    /// Creates a resolver over a registry.
    #[must_use]
    pub const fn new(registry: &'a ModelRegistry, references: &'a R) -> Self {
        Self {
            registry,
            references,
        }
    }

    /// Resolves the best match and keeps the winning model and score.
    ///
    /// A winner whose cost center does not resolve yields `None`.
    #[must_use]
    pub fn resolve_scored(
        &self,
        product_id: ProductId,
        contact_id: ContactId,
    ) -> Option<ResolvedMatch<'a>> {
        let matched = SpecificityMatcher::find_best_match(
            self.registry,
            self.references,
            product_id,
            contact_id,
        )?;
        let model = matched.model;

        let Some(cost_center) = self.references.cost_center(model.cost_center_id) else {
            tracing::warn!(
                model_id = %model.id,
                cost_center_id = %model.cost_center_id,
                "Matching model targets unknown cost center"
            );
            return None;
        };

        Some(ResolvedMatch {
            matched,
            assignment: CostCenterAssignment {
                cost_center_id: cost_center.id,
                cost_center_name: cost_center.name.clone(),
            },
        })
    }
}

impl<R: ReferenceLookup> CostCenterResolver for SpecificityResolver<'_, R> {
    fn name(&self) -> &'static str {
        "specificity"
    }

    fn resolve(
        &self,
        product_id: ProductId,
        contact_id: ContactId,
    ) -> Option<CostCenterAssignment> {
        self.resolve_scored(product_id, contact_id)
            .map(|resolved| resolved.assignment)
    }
}

/// Product-rule-then-category-rule matching. Ignores the contact.
pub struct LegacyRuleResolver<'a, R> {
    rules: &'a LegacyRuleSet,
    references: &'a R,
}

impl<'a, R: ReferenceLookup> LegacyRuleResolver<'a, R> {
    /// Creates a resolver over a rule set.
    #[must_use]
    pub const fn new(rules: &'a LegacyRuleSet, references: &'a R) -> Self {
        Self { rules, references }
    }
}

impl<R: ReferenceLookup> CostCenterResolver for LegacyRuleResolver<'_, R> {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn resolve(
        &self,
        product_id: ProductId,
        _contact_id: ContactId,
    ) -> Option<CostCenterAssignment> {
        LegacyRuleMatcher::find_cost_center(self.rules, self.references, product_id)
    }
}
