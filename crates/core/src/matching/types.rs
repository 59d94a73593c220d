//! Matching domain types.

use chrono::{DateTime, Utc};
use costwise_shared::types::{
    ContactId, CostCenterId, LegacyRuleId, MatchingModelId, PartnerTagId, ProductId,
};
use serde::{Deserialize, Serialize};

use super::error::MatchingError;
use crate::reference::types::normalize_category;

/// Lifecycle status of an analytical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    /// Being edited; ignored by matching.
    Draft,
    /// Active; participates in matching.
    Confirmed,
    /// Retired; ignored by matching.
    Cancelled,
}

impl ModelStatus {
    /// Parse a status from a string.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError::UnknownValue` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, MatchingError> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(MatchingError::UnknownValue(s.to_string())),
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Validates a forward transition and returns the new status.
    ///
    /// Allowed: draft → confirmed, draft → cancelled, confirmed → cancelled.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError::InvalidTransition` for anything else.
    pub fn transition_to(self, to: Self) -> Result<Self, MatchingError> {
        match (self, to) {
            (Self::Draft, Self::Confirmed | Self::Cancelled) | (Self::Confirmed, Self::Cancelled) => {
                Ok(to)
            }
            _ => Err(MatchingError::InvalidTransition { from: self, to }),
        }
    }
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The optional predicates of an analytical model.
///
/// An unset predicate neither scores nor disqualifies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria {
    /// Exact product.
    pub product_id: Option<ProductId>,
    /// Exact partner (contact).
    pub partner_id: Option<ContactId>,
    /// Product category.
    pub product_category: Option<String>,
    /// Partner tag.
    pub partner_tag_id: Option<PartnerTagId>,
}

impl MatchCriteria {
    /// Criteria that match every transaction.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Sets the product predicate.
    #[must_use]
    pub const fn with_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Sets the partner predicate.
    #[must_use]
    pub const fn with_partner(mut self, partner_id: ContactId) -> Self {
        self.partner_id = Some(partner_id);
        self
    }

    /// Sets the product-category predicate.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.product_category = normalize_category(Some(category.into()));
        self
    }

    /// Sets the partner-tag predicate.
    #[must_use]
    pub const fn with_partner_tag(mut self, tag_id: PartnerTagId) -> Self {
        self.partner_tag_id = Some(tag_id);
        self
    }

    /// Number of predicates that are set.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.product_id.is_some())
            + usize::from(self.partner_id.is_some())
            + usize::from(self.product_category.is_some())
            + usize::from(self.partner_tag_id.is_some())
    }

    /// Returns true if no predicate is set (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An analytical model mapping criteria to a cost center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingModel {
    /// Model ID.
    pub id: MatchingModelId,
    /// Model name.
    pub name: String,
    /// Lifecycle status.
    pub status: ModelStatus,
    /// Match predicates.
    pub criteria: MatchCriteria,
    /// Assignment target.
    pub cost_center_id: CostCenterId,
    /// Creation timestamp; defines registry order.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a matching model.
#[derive(Debug, Clone)]
pub struct NewMatchingModel {
    /// Model name.
    pub name: String,
    /// Match predicates.
    pub criteria: MatchCriteria,
    /// Assignment target; mandatory.
    pub cost_center_id: Option<CostCenterId>,
}

impl MatchingModel {
    /// Creates a draft model.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError::BlankName` or `MatchingError::MissingCostCenter`.
    pub fn new(input: NewMatchingModel, now: DateTime<Utc>) -> Result<Self, MatchingError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(MatchingError::BlankName);
        }
        let cost_center_id = input
            .cost_center_id
            .ok_or(MatchingError::MissingCostCenter)?;

        let mut criteria = input.criteria;
        criteria.product_category = normalize_category(criteria.product_category);

        Ok(Self {
            id: MatchingModelId::new(),
            name: name.to_string(),
            status: ModelStatus::Draft,
            criteria,
            cost_center_id,
            created_at: now,
        })
    }

    /// Returns true if the model participates in matching.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == ModelStatus::Confirmed
    }
}

/// What a legacy rule matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Matches one product by ID.
    Product,
    /// Matches a product category.
    Category,
}

impl RuleKind {
    /// Parse a rule kind from a string.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError::UnknownValue` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, MatchingError> {
        match s.to_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "category" => Ok(Self::Category),
            _ => Err(MatchingError::UnknownValue(s.to_string())),
        }
    }

    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
        }
    }
}

/// A two-tier posting rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyRule {
    /// Rule ID.
    pub id: LegacyRuleId,
    /// Product or category rule.
    pub kind: RuleKind,
    /// Product ID (as a string) or category name.
    pub value: String,
    /// Assignment target.
    pub cost_center_id: CostCenterId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl LegacyRule {
    /// Creates a rule for one product.
    #[must_use]
    pub fn for_product(
        product_id: ProductId,
        cost_center_id: CostCenterId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: LegacyRuleId::new(),
            kind: RuleKind::Product,
            value: product_id.to_string(),
            cost_center_id,
            created_at: now,
        }
    }

    /// Creates a rule for a product category.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError::BlankRuleValue` if the category is blank.
    pub fn for_category(
        category: impl Into<String>,
        cost_center_id: CostCenterId,
        now: DateTime<Utc>,
    ) -> Result<Self, MatchingError> {
        let value =
            normalize_category(Some(category.into())).ok_or(MatchingError::BlankRuleValue)?;
        Ok(Self {
            id: LegacyRuleId::new(),
            kind: RuleKind::Category,
            value,
            cost_center_id,
            created_at: now,
        })
    }
}

/// A resolved cost center, as shown by the preview endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterAssignment {
    /// Cost center ID.
    pub cost_center_id: CostCenterId,
    /// Cost center name.
    pub cost_center_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_cost_center() {
        let input = NewMatchingModel {
            name: "Orphan".to_string(),
            criteria: MatchCriteria::any(),
            cost_center_id: None,
        };
        assert_eq!(
            MatchingModel::new(input, Utc::now()),
            Err(MatchingError::MissingCostCenter)
        );
    }

    #[test]
    fn test_new_model_starts_draft() {
        let input = NewMatchingModel {
            name: " Hardware ".to_string(),
            criteria: MatchCriteria::any().with_category("Hardware"),
            cost_center_id: Some(CostCenterId::new()),
        };
        let model = MatchingModel::new(input, Utc::now()).unwrap();
        assert_eq!(model.status, ModelStatus::Draft);
        assert_eq!(model.name, "Hardware");
        assert!(!model.is_confirmed());
    }

    #[test]
    fn test_model_status_transitions() {
        use ModelStatus::{Cancelled, Confirmed, Draft};

        assert_eq!(Draft.transition_to(Confirmed), Ok(Confirmed));
        assert_eq!(Draft.transition_to(Cancelled), Ok(Cancelled));
        assert_eq!(Confirmed.transition_to(Cancelled), Ok(Cancelled));
        assert!(Confirmed.transition_to(Draft).is_err());
        assert!(Cancelled.transition_to(Confirmed).is_err());
        assert!(Confirmed.transition_to(Confirmed).is_err());
    }

    #[test]
    fn test_criteria_len() {
        assert!(MatchCriteria::any().is_empty());
        let full = MatchCriteria::any()
            .with_product(ProductId::new())
            .with_partner(ContactId::new())
            .with_category("Raw")
            .with_partner_tag(PartnerTagId::new());
        assert_eq!(full.len(), 4);
    }

    #[test]
    fn test_category_rule_rejects_blank() {
        let result = LegacyRule::for_category("  ", CostCenterId::new(), Utc::now());
        assert_eq!(result, Err(MatchingError::BlankRuleValue));
    }
}
