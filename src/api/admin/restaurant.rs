use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::entities::restaurant::{self, Entity as RestaurantEntity};

//ROUTERS
pub fn admin_restaurant_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/restaurant", get(admin_get_restaurants).post(create_restaurant))
        .route(
            "/restaurant/:id",
            patch(patch_restaurant).delete(delete_restaurant),
        )
        .layer(Extension(db))
}

//ROUTES
//Unlike the public listing, inactive restaurants are included here.
async fn admin_get_restaurants(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let restaurants = RestaurantEntity::find()
        .order_by_desc(restaurant::Column::Id)
        .all(&*db)
        .await?;

    Ok((StatusCode::OK, Json(restaurants)).into_response())
}

async fn create_restaurant(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateRestaurant>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;

    let new_restaurant = restaurant::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description.unwrap_or_default()),
        address: Set(payload.address),
        image: Set(payload.image.unwrap_or_default()),
        is_active: Set(payload.is_active.unwrap_or(true)),
        ..Default::default()
    };

    match new_restaurant.insert(&txn).await {
        Ok(model) => {
            txn.commit().await?;
            Ok((StatusCode::CREATED, Json(model)).into_response())
        }
        Err(_) => {
            let _ = txn.rollback().await;
            Err(ApiError::Conflict("Restaurant already exists".to_string()))
        }
    }
}

async fn patch_restaurant(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchRestaurant>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;

    let model = RestaurantEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No restaurant with {} id was found", id)))?;

    let mut model: restaurant::ActiveModel = model.into();

    if let Some(name) = payload.name {
        model.name = Set(name);
    }

    if let Some(description) = payload.description {
        model.description = Set(description);
    }

    if let Some(address) = payload.address {
        model.address = Set(address);
    }

    if let Some(image) = payload.image {
        model.image = Set(image);
    }

    if let Some(is_active) = payload.is_active {
        model.is_active = Set(is_active);
    }

    match model.update(&txn).await {
        Ok(updated) => {
            txn.commit().await?;
            Ok((StatusCode::OK, Json(updated)).into_response())
        }
        Err(_) => {
            //unique name constraint
            let _ = txn.rollback().await;
            Err(ApiError::Conflict("Failed to patch this resource".to_string()))
        }
    }
}

async fn delete_restaurant(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let txn = db.begin().await?;

    let model = RestaurantEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No restaurant with {} id was found", id)))?;

    let model: restaurant::ActiveModel = model.into();
    model.delete(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Restaurant removed"
        })),
    )
        .into_response())
}

//structs
#[derive(Deserialize, Clone, Debug)]
struct CreateRestaurant {
    name: String,
    description: Option<String>,
    address: String,
    image: Option<String>,
    is_active: Option<bool>,
}

#[derive(Deserialize)]
struct PatchRestaurant {
    name: Option<String>,
    description: Option<String>,
    address: Option<String>,
    image: Option<String>,
    is_active: Option<bool>,
}
