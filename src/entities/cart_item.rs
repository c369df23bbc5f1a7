use crate::entities::food;
use crate::entities::user::Entity as User;
use sea_orm::entity::prelude::*;

//One line of a user's cart. A cart is just the set of rows for a user id;
//quantity stays strictly positive, rows at or below zero are deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub user_id: i32,
    pub food_id: i32,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "User",
        from = "crate::entities::cart_item::Column::UserId",
        to = "crate::entities::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<crate::entities::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

//Join-only relation, deliberately kept out of the schema: the food row may
//be deleted while cart lines still point at it, and those lines must keep
//resolving to "nothing" rather than block the deletion.
impl Related<food::Entity> for Entity {
    fn to() -> RelationDef {
        Entity::belongs_to(food::Entity)
            .from(Column::FoodId)
            .to(food::Column::Id)
            .into()
    }
}
