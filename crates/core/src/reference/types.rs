//! Reference entity types.

use costwise_shared::types::{ContactId, CostCenterId, PartnerTagId, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReferenceError;

/// A budget-owning department or project bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    /// Cost center ID.
    pub id: CostCenterId,
    /// Display name.
    pub name: String,
}

impl CostCenter {
    /// Creates a cost center with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::BlankName` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ReferenceError> {
        Ok(Self {
            id: CostCenterId::new(),
            name: non_blank(name.into(), "Cost center")?,
        })
    }
}

/// A label attached to contacts, usable as a matching criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerTag {
    /// Tag ID.
    pub id: PartnerTagId,
    /// Tag name.
    pub name: String,
}

impl PartnerTag {
    /// Creates a partner tag with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::BlankName` if the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, ReferenceError> {
        Ok(Self {
            id: PartnerTagId::new(),
            name: non_blank(name.into(), "Partner tag")?,
        })
    }
}

/// Whether a contact buys from us, sells to us, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
    /// Buys from us.
    Customer,
    /// Sells to us.
    Vendor,
    /// Both customer and vendor.
    Both,
}

impl ContactType {
    /// Parse a contact type from a string.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::UnknownContactType` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        match s.to_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "vendor" => Ok(Self::Vendor),
            "both" => Ok(Self::Both),
            _ => Err(ReferenceError::UnknownContactType(s.to_string())),
        }
    }

    /// Returns the string representation of the contact type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Vendor => "vendor",
            Self::Both => "both",
        }
    }
}

/// A sellable or purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Product category, if any.
    pub category: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Vendor that owns the product, if any.
    pub vendor_id: Option<ContactId>,
}

impl Product {
    /// Creates a product with a fresh ID.
    ///
    /// A blank category is stored as no category.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the price is negative.
    pub fn new(
        name: impl Into<String>,
        category: Option<String>,
        price: Decimal,
        vendor_id: Option<ContactId>,
    ) -> Result<Self, ReferenceError> {
        if price < Decimal::ZERO {
            return Err(ReferenceError::NegativePrice);
        }

        Ok(Self {
            id: ProductId::new(),
            name: non_blank(name.into(), "Product")?,
            category: normalize_category(category),
            price,
            vendor_id,
        })
    }
}

/// A customer or vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact ID.
    pub id: ContactId,
    /// Contact name.
    pub name: String,
    /// Customer, vendor, or both.
    pub contact_type: ContactType,
    /// Partner tag, if any.
    pub tag_id: Option<PartnerTagId>,
}

impl Contact {
    /// Creates a contact with a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceError::BlankName` if the name is blank.
    pub fn new(
        name: impl Into<String>,
        contact_type: ContactType,
        tag_id: Option<PartnerTagId>,
    ) -> Result<Self, ReferenceError> {
        Ok(Self {
            id: ContactId::new(),
            name: non_blank(name.into(), "Contact")?,
            contact_type,
            tag_id,
        })
    }
}

/// Trims a category and maps the empty string to `None`.
#[must_use]
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

fn non_blank(name: String, entity: &'static str) -> Result<String, ReferenceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ReferenceError::BlankName { entity });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_blank_category_is_none() {
        let product = Product::new("Bolt", Some("  ".to_string()), dec!(2.50), None).unwrap();
        assert!(product.category.is_none());

        let product = Product::new("Bolt", Some(" Hardware ".to_string()), dec!(2.50), None).unwrap();
        assert_eq!(product.category.as_deref(), Some("Hardware"));
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let result = Product::new("Bolt", None, dec!(-1), None);
        assert_eq!(result, Err(ReferenceError::NegativePrice));
    }

    #[test]
    fn test_blank_names_rejected() {
        assert!(CostCenter::new("   ").is_err());
        assert!(Contact::new("", ContactType::Vendor, None).is_err());
    }

    #[test]
    fn test_contact_type_parse_roundtrip() {
        for ct in [ContactType::Customer, ContactType::Vendor, ContactType::Both] {
            assert_eq!(ContactType::parse(ct.as_str()).unwrap(), ct);
        }
        assert!(ContactType::parse("supplier").is_err());
    }
}
