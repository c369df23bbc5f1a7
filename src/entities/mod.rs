pub mod user;
pub mod restaurant;
pub mod food;
pub mod cart_item;
pub mod order;
pub mod order_item;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema, Set, TransactionTrait};
use std::sync::Arc;

use crate::entities::{
    cart_item::Entity as CartItem,
    food::Entity as Food,
    order::Entity as Order,
    order_item::Entity as OrderItem,
    restaurant::Entity as Restaurant,
    user::Entity as User,
};

pub async fn setup_schema(db: &DatabaseConnection) {
    let schema = Schema::new(db.get_database_backend());
    let create_user_table = schema.create_table_from_entity(User);
    let create_restaurant_table = schema.create_table_from_entity(Restaurant);
    let create_food_table = schema.create_table_from_entity(Food);
    let create_cart_item_table = schema.create_table_from_entity(CartItem);
    let create_order_table = schema.create_table_from_entity(Order);
    let create_order_item_table = schema.create_table_from_entity(OrderItem);

    db.execute(db.get_database_backend().build(&create_user_table))
        .await
        .expect("Failed to create user schema");
    db.execute(db.get_database_backend().build(&create_restaurant_table))
        .await
        .expect("Failed to create restaurant schema");
    db.execute(db.get_database_backend().build(&create_food_table))
        .await
        .expect("Failed to create food schema");
    db.execute(db.get_database_backend().build(&create_cart_item_table))
        .await
        .expect("Failed to create cart_item schema");
    db.execute(db.get_database_backend().build(&create_order_table))
        .await
        .expect("Failed to create order schema");
    db.execute(db.get_database_backend().build(&create_order_item_table))
        .await
        .expect("Failed to create order_item schema");
}

//Seeds one admin and one demo user so a fresh database is usable right away.
pub async fn primary_setup(db: Arc<DatabaseConnection>) {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password("Secret15".as_bytes(), &salt)
        .expect("Failed to hash password")
        .to_string();

    let new_admin = user::ActiveModel {
        username: Set("admin".to_owned()),
        password: Set(password_hash.clone()),
        role: Set(user::Role::Admin),
        ..Default::default()
    };

    let new_user = user::ActiveModel {
        username: Set("user".to_owned()),
        password: Set(password_hash),
        role: Set(user::Role::User),
        ..Default::default()
    };

    let txn = db
        .begin()
        .await
        .expect("Failed to start primary setup transaction");
    match user::Entity::insert_many([new_user, new_admin]).exec(&txn).await {
        Ok(_) => {
            txn.commit().await.expect("Failed to commit primary setup");
        }
        Err(_) => {
            //unique constraint on username: the database was seeded before
            let _ = txn.rollback().await;
            tracing::warn!("default accounts already present, skipping seed");
        }
    }
}
