use sea_orm::entity::prelude::*;

use super::enums::BroadcastStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "surplus_broadcasts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub operator_id: i64,
    pub item_name: String,
    pub category: String,
    pub quantity: String,
    pub pickup_window: Option<String>,
    pub status: BroadcastStatus,
    pub claimed_by: Option<i64>,
    pub claimed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OperatorId",
        to = "super::users::Column::Id"
    )]
    Operator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClaimedBy",
        to = "super::users::Column::Id"
    )]
    Claimer,
}

// The owning operator is the default join; claimers are reached explicitly.
impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
