pub mod auth;
pub mod food;
pub mod restaurant;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use auth::auth_router;
use food::food_router;
use restaurant::restaurant_router;

pub fn public_api_router(db: Arc<DatabaseConnection>) -> Router {
    let auth_router = auth_router(db.clone());
    let restaurant_router = restaurant_router(db.clone());
    let food_router = food_router(db.clone());

    Router::new()
        .nest("/", auth_router)
        .nest("/", restaurant_router)
        .nest("/", food_router)
}
