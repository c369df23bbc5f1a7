use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::user::cart::{cart_total, load_cart_rows};
use crate::entities::{
    cart_item::{self, Entity as CartItemEntity},
    order::{self, PaymentMethod, Status},
    order_item,
};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/order", post(place_order).get(my_orders))
        .layer(Extension(db))
}

//ROUTES
//Checkout. Snapshot construction, order insertion and cart clearing run
//inside one transaction: a duplicate submission lands after the commit,
//finds the cart empty and gets EmptyCart instead of a second order.
async fn place_order(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<PlaceOrder>,
) -> Result<Response, ApiError> {
    let user_id = claims.user_id;

    if payload.delivery_address.trim().is_empty() {
        return Err(ApiError::Validation(
            "Delivery address is required".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let rows = load_cart_rows(&txn, user_id).await?;
    let total = cart_total(&rows);

    //lines whose food record no longer resolves have nothing to freeze
    let snapshots: Vec<(cart_item::Model, crate::entities::food::Model)> = rows
        .into_iter()
        .filter_map(|(entry, food)| food.map(|food| (entry, food)))
        .collect();

    if snapshots.is_empty() {
        return Err(ApiError::EmptyCart);
    }

    let new_order = order::ActiveModel {
        user_id: Set(user_id),
        total_amount: Set(total),
        delivery_address: Set(payload.delivery_address),
        payment_method: Set(payload.payment_method.unwrap_or(PaymentMethod::Cod)),
        status: Set(Status::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let order_model = new_order.insert(&txn).await?;

    let snapshot_lines: Vec<order_item::ActiveModel> = snapshots
        .into_iter()
        .map(|(entry, food)| order_item::ActiveModel {
            order_id: Set(order_model.id),
            food_id: Set(food.id),
            name: Set(food.name),
            price: Set(food.price),
            quantity: Set(entry.quantity),
            image: Set(food.image),
            ..Default::default()
        })
        .collect();
    order_item::Entity::insert_many(snapshot_lines).exec(&txn).await?;

    CartItemEntity::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(order_model.id))
        .order_by_asc(order_item::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse::new(order_model, items)),
    )
        .into_response())
}

async fn my_orders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Extension(claims): Extension<Claims>,
) -> Result<Response, ApiError> {
    let orders = order::Entity::find()
        .filter(order::Column::UserId.eq(claims.user_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .find_with_related(order_item::Entity)
        .all(&*db)
        .await?;

    let response: Vec<OrderResponse> = orders
        .into_iter()
        .map(|(order, items)| OrderResponse::new(order, items))
        .collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

//structs
#[derive(Deserialize, Debug)]
struct PlaceOrder {
    delivery_address: String,
    payment_method: Option<PaymentMethod>,
}

#[derive(Serialize)]
pub(crate) struct OrderResponse {
    id: i32,
    user_id: i32,
    items: Vec<OrderItemResponse>,
    total_amount: f32,
    delivery_address: String,
    payment_method: PaymentMethod,
    status: Status,
    created_at: sea_orm::prelude::DateTimeUtc,
}

#[derive(Serialize)]
pub(crate) struct OrderItemResponse {
    food_id: i32,
    name: String,
    price: f32,
    quantity: i32,
    image: String,
}

impl OrderResponse {
    pub(crate) fn new(value: order::Model, items: Vec<order_item::Model>) -> OrderResponse {
        OrderResponse {
            id: value.id,
            user_id: value.user_id,
            items: items.into_iter().map(OrderItemResponse::new).collect(),
            total_amount: value.total_amount,
            delivery_address: value.delivery_address,
            payment_method: value.payment_method,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl OrderItemResponse {
    fn new(value: order_item::Model) -> OrderItemResponse {
        OrderItemResponse {
            food_id: value.food_id,
            name: value.name,
            price: value.price,
            quantity: value.quantity,
            image: value.image,
        }
    }
}
