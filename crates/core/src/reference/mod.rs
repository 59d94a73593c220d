//! Reference data consumed by the engine.
//!
//! Products, contacts, partner tags, and cost centers are maintained elsewhere;
//! the engine only reads them through [`ReferenceLookup`].

pub mod error;
pub mod store;
pub mod types;

pub use error::ReferenceError;
pub use store::{ReferenceLookup, ReferenceSet};
pub use types::{Contact, ContactType, CostCenter, PartnerTag, Product};
