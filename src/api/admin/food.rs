use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::entities::{
    food::{self, Entity as FoodEntity},
    restaurant,
};

//ROUTERS
pub fn admin_food_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/food", post(create_food))
        .route("/food/:id", patch(patch_food).delete(delete_food))
        .layer(Extension(db))
}

//ROUTES
async fn create_food(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateFood>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;

    restaurant::Entity::find_by_id(payload.restaurant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No restaurant with {} id was found",
                payload.restaurant_id
            ))
        })?;

    let new_food = food::ActiveModel {
        restaurant_id: Set(payload.restaurant_id),
        name: Set(payload.name),
        price: Set(payload.price),
        category: Set(payload.category.unwrap_or_default()),
        image: Set(payload.image.unwrap_or_default()),
        is_available: Set(payload.is_available.unwrap_or(true)),
        ..Default::default()
    };

    let model = new_food.insert(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(model)).into_response())
}

async fn patch_food(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchFood>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;

    let model = FoodEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No food item with {} id was found", id)))?;

    let mut model: food::ActiveModel = model.into();

    if let Some(restaurant_id) = payload.restaurant_id {
        restaurant::Entity::find_by_id(restaurant_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!("No restaurant with {} id was found", restaurant_id))
            })?;
        model.restaurant_id = Set(restaurant_id);
    }

    if let Some(name) = payload.name {
        model.name = Set(name);
    }

    if let Some(price) = payload.price {
        model.price = Set(price);
    }

    if let Some(category) = payload.category {
        model.category = Set(category);
    }

    if let Some(image) = payload.image {
        model.image = Set(image);
    }

    if let Some(is_available) = payload.is_available {
        model.is_available = Set(is_available);
    }

    let updated = model.update(&txn).await?;
    txn.commit().await?;

    Ok((StatusCode::OK, Json(updated)).into_response())
}

async fn delete_food(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;

    let model = FoodEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No food item with {} id was found", id)))?;

    let model: food::ActiveModel = model.into();
    model.delete(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Food item removed"
        })),
    )
        .into_response())
}

//structs
#[derive(Deserialize, Clone, Debug)]
struct CreateFood {
    restaurant_id: i32,
    name: String,
    price: f32,
    category: Option<String>,
    image: Option<String>,
    is_available: Option<bool>,
}

#[derive(Deserialize)]
struct PatchFood {
    restaurant_id: Option<i32>,
    name: Option<String>,
    price: Option<f32>,
    category: Option<String>,
    image: Option<String>,
    is_available: Option<bool>,
}
