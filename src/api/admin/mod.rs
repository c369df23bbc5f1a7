pub mod food;
pub mod order;
pub mod restaurant;
pub mod user;

use axum::{middleware::from_fn_with_state, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState};

use food::admin_food_router;
use order::admin_order_router;
use restaurant::admin_restaurant_router;
use user::admin_user_router;

pub fn admin_api_router(db: Arc<DatabaseConnection>) -> Router {
    let admin_restaurant_router = admin_restaurant_router(db.clone());
    let admin_food_router = admin_food_router(db.clone());
    let admin_order_router = admin_order_router(db.clone());
    let admin_user_router = admin_user_router(db.clone());

    Router::new()
        .nest("/", admin_restaurant_router)
        .nest("/", admin_food_router)
        .nest("/", admin_order_router)
        .nest("/", admin_user_router)
        .layer(from_fn_with_state(
            AuthState {
                db: db.clone(),
                role: Role::Admin,
            },
            auth_middleware,
        ))
}
