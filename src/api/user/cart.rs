use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::entities::{
    cart_item::{self, Entity as CartItemEntity},
    food,
};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn cart_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/cart/:food_id", delete(remove_from_cart))
        .layer(Extension(db))
}

//ROUTES
async fn get_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let view = load_cart_view(&*db, claims.user_id).await?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

//Add-or-adjust: one operation covers insert, increment and decrement.
//A row whose quantity would drop to zero or below is deleted instead.
async fn add_to_cart(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<AddToCart>,
) -> Result<Response, ApiError> {
    let user_id = claims.user_id;
    let delta = payload.quantity.unwrap_or(1);
    if delta == 0 {
        return Err(ApiError::Validation(
            "Quantity delta must be non-zero".to_string(),
        ));
    }

    let txn = db.begin().await?;

    food::Entity::find_by_id(payload.food_id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("No food item with {} id was found", payload.food_id))
        })?;

    let existing = CartItemEntity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::FoodId.eq(payload.food_id))
        .one(&txn)
        .await?;

    match existing {
        Some(entry) => {
            let quantity = entry.quantity.saturating_add(delta);
            let entry: cart_item::ActiveModel = entry.into();
            if quantity <= 0 {
                entry.delete(&txn).await?;
            } else {
                let mut entry = entry;
                entry.quantity = Set(quantity);
                entry.update(&txn).await?;
            }
        }
        None if delta > 0 => {
            let new_entry = cart_item::ActiveModel {
                user_id: Set(user_id),
                food_id: Set(payload.food_id),
                quantity: Set(delta),
                ..Default::default()
            };
            CartItemEntity::insert(new_entry).exec(&txn).await?;
        }
        //reducing an absent line: nothing to do
        None => {}
    }

    txn.commit().await?;

    let view = load_cart_view(&*db, user_id).await?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

//Unconditional removal; deleting an absent line is a success, so retries
//are harmless.
async fn remove_from_cart(
    Path(food_id): Path<i32>,
    Extension(claims): Extension<Claims>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let user_id = claims.user_id;

    CartItemEntity::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .filter(cart_item::Column::FoodId.eq(food_id))
        .exec(&*db)
        .await?;

    let view = load_cart_view(&*db, user_id).await?;
    Ok((StatusCode::OK, Json(view)).into_response())
}

async fn clear_cart(
    Extension(claims): Extension<Claims>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    CartItemEntity::delete_many()
        .filter(cart_item::Column::UserId.eq(claims.user_id))
        .exec(&*db)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Cart cleared"
        })),
    )
        .into_response())
}

//helpers
pub(crate) async fn load_cart_rows<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> Result<Vec<(cart_item::Model, Option<food::Model>)>, ApiError> {
    let rows = CartItemEntity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .order_by_asc(cart_item::Column::Id)
        .find_also_related(food::Entity)
        .all(conn)
        .await?;
    Ok(rows)
}

async fn load_cart_view<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> Result<CartResponse, ApiError> {
    let rows = load_cart_rows(conn, user_id).await?;
    Ok(CartResponse::new(rows))
}

//Lines whose food record no longer resolves contribute zero.
pub(crate) fn cart_total(rows: &[(cart_item::Model, Option<food::Model>)]) -> f32 {
    rows.iter()
        .filter_map(|(entry, food)| {
            food.as_ref().map(|food| food.price * entry.quantity as f32)
        })
        .sum()
}

//structs
#[derive(Deserialize, Debug)]
struct AddToCart {
    food_id: i32,
    quantity: Option<i32>,
}

#[derive(Serialize)]
pub(crate) struct CartResponse {
    items: Vec<CartEntryResponse>,
    total: f32,
}

#[derive(Serialize)]
struct CartEntryResponse {
    food_id: i32,
    quantity: i32,
    food: Option<FoodDetails>,
}

#[derive(Serialize)]
struct FoodDetails {
    name: String,
    price: f32,
    image: String,
    is_available: bool,
    restaurant_id: i32,
}

impl CartResponse {
    fn new(rows: Vec<(cart_item::Model, Option<food::Model>)>) -> CartResponse {
        let total = cart_total(&rows);
        let items = rows
            .into_iter()
            .map(|(entry, food)| CartEntryResponse {
                food_id: entry.food_id,
                quantity: entry.quantity,
                food: food.map(|food| FoodDetails {
                    name: food.name,
                    price: food.price,
                    image: food.image,
                    is_available: food.is_available,
                    restaurant_id: food.restaurant_id,
                }),
            })
            .collect();

        CartResponse { items, total }
    }
}
