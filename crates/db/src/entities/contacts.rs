//! `SeaORM` Entity for contacts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ContactType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub contact_type: ContactType,
    pub tag_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::partner_tags::Entity",
        from = "Column::TagId",
        to = "super::partner_tags::Column::Id"
    )]
    PartnerTags,
}

impl Related<super::partner_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PartnerTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
