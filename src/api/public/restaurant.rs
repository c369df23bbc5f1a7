use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::entities::restaurant::{self, Entity as RestaurantEntity};

pub fn restaurant_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/restaurant", get(get_restaurants))
        .route("/restaurant/:id", get(get_restaurant))
        .layer(Extension(db))
}

async fn get_restaurants(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let restaurants = RestaurantEntity::find()
        .filter(restaurant::Column::IsActive.eq(true))
        .order_by_desc(restaurant::Column::Id)
        .all(&*db)
        .await?;

    Ok((StatusCode::OK, Json(restaurants)).into_response())
}

async fn get_restaurant(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let restaurant = RestaurantEntity::find_by_id(id)
        .one(&*db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No restaurant with {} id was found", id)))?;

    Ok((StatusCode::OK, Json(restaurant)).into_response())
}
