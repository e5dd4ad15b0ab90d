use sea_orm::entity::prelude::*;

use super::enums::MealPeriod;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "production_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub production_date: Date,
    pub menu_item_id: i64,
    pub operator_id: i64,
    pub shift: MealPeriod,
    pub quantity_prepared: i64,
    pub quantity_consumed: i64,
    /// Always `quantity_prepared - quantity_consumed`; may be negative.
    pub quantity_surplus: i64,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OperatorId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::menu_items::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_items::Column::Id"
    )]
    MenuItems,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::menu_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
