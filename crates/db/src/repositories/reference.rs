//! Reference data repository.
//!
//! Products, contacts, partner tags and cost centers are owned by other
//! systems. The engine only reads them; the create methods exist for seeding.

use chrono::Utc;
use costwise_core::reference::{
    Contact, ContactType, CostCenter, PartnerTag, Product, ReferenceSet,
};
use costwise_shared::types::{ContactId, CostCenterId, PartnerTagId};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};

use super::error::RepositoryError;
use crate::entities::{contacts, cost_centers, partner_tags, products};

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    /// Product name.
    pub name: String,
    /// Optional category.
    pub category: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Owning vendor.
    pub vendor_id: Option<ContactId>,
}

/// Reference data repository.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    db: DatabaseConnection,
}

impl ReferenceRepository {
    /// Creates a new reference repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads products, contacts and cost centers into a lookup set.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn load<C: ConnectionTrait>(conn: &C) -> Result<ReferenceSet, DbErr> {
        let products = products::Entity::find().all(conn).await?;
        let contacts = contacts::Entity::find().all(conn).await?;
        let cost_centers = Self::load_cost_centers(conn).await?;

        Ok(ReferenceSet::from_parts(
            products.into_iter().map(Product::from),
            contacts.into_iter().map(Contact::from),
            cost_centers,
        ))
    }

    /// Loads all cost centers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn load_cost_centers<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<CostCenter>, DbErr> {
        let rows = cost_centers::Entity::find()
            .order_by_asc(cost_centers::Column::Name)
            .all(conn)
            .await?;
        Ok(rows.into_iter().map(CostCenter::from).collect())
    }

    /// Lists all cost centers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_cost_centers(&self) -> Result<Vec<CostCenter>, RepositoryError> {
        Ok(Self::load_cost_centers(&self.db).await?)
    }

    /// Finds a cost center by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_cost_center(
        &self,
        id: CostCenterId,
    ) -> Result<Option<CostCenter>, RepositoryError> {
        let row = cost_centers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(row.map(CostCenter::from))
    }

    /// Creates a cost center.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails.
    pub async fn create_cost_center(&self, name: &str) -> Result<CostCenter, RepositoryError> {
        let cost_center = CostCenter::new(name)?;
        cost_centers::ActiveModel {
            id: Set(cost_center.id.into_inner()),
            name: Set(cost_center.name.clone()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(
            cost_center_id = %cost_center.id,
            name = %cost_center.name,
            "Cost center created"
        );
        Ok(cost_center)
    }

    /// Creates a partner tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails.
    pub async fn create_partner_tag(&self, name: &str) -> Result<PartnerTag, RepositoryError> {
        let tag = PartnerTag::new(name)?;
        partner_tags::ActiveModel {
            id: Set(tag.id.into_inner()),
            name: Set(tag.name.clone()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(tag)
    }

    /// Creates a contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the insert fails.
    pub async fn create_contact(
        &self,
        name: &str,
        contact_type: ContactType,
        tag_id: Option<PartnerTagId>,
    ) -> Result<Contact, RepositoryError> {
        let contact = Contact::new(name, contact_type, tag_id)?;
        contacts::ActiveModel {
            id: Set(contact.id.into_inner()),
            name: Set(contact.name.clone()),
            contact_type: Set(contact.contact_type.into()),
            tag_id: Set(contact.tag_id.map(PartnerTagId::into_inner)),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(contact)
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the insert fails.
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<Product, RepositoryError> {
        let product = Product::new(input.name, input.category, input.price, input.vendor_id)?;
        products::ActiveModel {
            id: Set(product.id.into_inner()),
            name: Set(product.name.clone()),
            category: Set(product.category.clone()),
            price: Set(product.price),
            vendor_id: Set(product.vendor_id.map(ContactId::into_inner)),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(product)
    }
}
