//! `SeaORM` Entity for budget_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::BudgetLineType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub budget_id: Uuid,
    pub matching_model_id: Uuid,
    pub line_type: BudgetLineType,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub budgeted_amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id",
        on_delete = "Cascade"
    )]
    Budgets,
    #[sea_orm(
        belongs_to = "super::matching_models::Entity",
        from = "Column::MatchingModelId",
        to = "super::matching_models::Column::Id"
    )]
    MatchingModels,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl Related<super::matching_models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchingModels.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
