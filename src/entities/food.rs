use sea_orm::entity::prelude::*;
use serde::Serialize;
use crate::entities::restaurant::Entity as Restaurant;

//The Menu Catalog record: everything a cart or an order snapshot ever
//reads about a dish is resolved against this table at read time.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "food")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub restaurant_id: i32,
    pub name: String,
    pub price: f32,
    pub category: String,
    pub image: String,
    pub is_available: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Restaurant",
        from = "crate::entities::food::Column::RestaurantId",
        to = "crate::entities::restaurant::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Restaurant,
}

impl Related<crate::entities::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
