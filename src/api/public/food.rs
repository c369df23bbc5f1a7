use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::entities::{
    food::{self, Entity as FoodEntity},
    restaurant,
};

pub fn food_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/food", get(get_foods))
        .layer(Extension(db))
}

//Availability is returned as a flag rather than filtered out: whether an
//unavailable dish can still be browsed or carted is the caller's call.
async fn get_foods(
    Query(params): Query<GetFoodsQuery>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let mut half_result = FoodEntity::find();

    if let Some(restaurant_id) = params.restaurant_id {
        half_result = half_result.filter(food::Column::RestaurantId.eq(restaurant_id));
    }

    if let Some(min) = params.min {
        half_result = half_result.filter(food::Column::Price.gte(min));
    }

    if let Some(max) = params.max {
        half_result = half_result.filter(food::Column::Price.lte(max));
    }

    let foods = half_result
        .order_by_desc(food::Column::Id)
        .find_also_related(restaurant::Entity)
        .all(&*db)
        .await?;

    let response: Vec<PublicFoodResponse> = foods
        .into_iter()
        .map(|(item, owner)| PublicFoodResponse::new(item, owner))
        .collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

#[derive(Deserialize)]
struct GetFoodsQuery {
    restaurant_id: Option<i32>,
    min: Option<f32>,
    max: Option<f32>,
}

#[derive(Serialize)]
struct PublicFoodResponse {
    id: i32,
    restaurant_id: i32,
    restaurant_name: Option<String>,
    name: String,
    price: f32,
    category: String,
    image: String,
    is_available: bool,
}

impl PublicFoodResponse {
    fn new(value: food::Model, owner: Option<restaurant::Model>) -> PublicFoodResponse {
        PublicFoodResponse {
            id: value.id,
            restaurant_id: value.restaurant_id,
            restaurant_name: owner.map(|r| r.name),
            name: value.name,
            price: value.price,
            category: value.category,
            image: value.image,
            is_available: value.is_available,
        }
    }
}
