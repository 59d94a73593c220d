//! Read-only lookup over reference data.

use std::collections::HashMap;

use costwise_shared::types::{ContactId, CostCenterId, ProductId};

use super::types::{Contact, CostCenter, Product};

/// Lookup seam for reference data.
///
/// The db crate loads a [`ReferenceSet`]; tests build one by hand.
pub trait ReferenceLookup {
    /// Finds a product by ID.
    fn product(&self, id: ProductId) -> Option<&Product>;

    /// Finds a contact by ID.
    fn contact(&self, id: ContactId) -> Option<&Contact>;

    /// Finds a cost center by ID.
    fn cost_center(&self, id: CostCenterId) -> Option<&CostCenter>;
}

/// In-memory reference data keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    products: HashMap<ProductId, Product>,
    contacts: HashMap<ContactId, Contact>,
    cost_centers: HashMap<CostCenterId, CostCenter>,
}

impl ReferenceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from loaded records.
    #[must_use]
    pub fn from_parts(
        products: impl IntoIterator<Item = Product>,
        contacts: impl IntoIterator<Item = Contact>,
        cost_centers: impl IntoIterator<Item = CostCenter>,
    ) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
            contacts: contacts.into_iter().map(|c| (c.id, c)).collect(),
            cost_centers: cost_centers.into_iter().map(|c| (c.id, c)).collect(),
        }
    }

    /// Adds a product.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id, product);
        self
    }

    /// Adds a contact.
    #[must_use]
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contacts.insert(contact.id, contact);
        self
    }

    /// Adds a cost center.
    #[must_use]
    pub fn with_cost_center(mut self, cost_center: CostCenter) -> Self {
        self.cost_centers.insert(cost_center.id, cost_center);
        self
    }

    /// Iterates over all cost centers.
    pub fn cost_centers(&self) -> impl Iterator<Item = &CostCenter> {
        self.cost_centers.values()
    }
}

impl ReferenceLookup for ReferenceSet {
    fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    fn cost_center(&self, id: CostCenterId) -> Option<&CostCenter> {
        self.cost_centers.get(&id)
    }
}
