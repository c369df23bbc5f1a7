use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::api::user::order::OrderResponse;
use crate::entities::{
    order::{self, Status},
    order_item, user,
};

//ROUTERS
pub fn admin_order_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/order", get(get_all_orders))
        .route("/order/:id/status", patch(set_order_status))
        .layer(Extension(db))
}

//ROUTES
async fn get_all_orders(
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    let orders = order::Entity::find()
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .find_with_related(order_item::Entity)
        .all(&*db)
        .await?;

    //one batched lookup instead of a username query per order
    let user_ids: Vec<i32> = orders.iter().map(|(order, _)| order.user_id).collect();
    let usernames: HashMap<i32, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(&*db)
        .await?
        .into_iter()
        .map(|user| (user.id, user.username))
        .collect();

    let response: Vec<AdminOrderResponse> = orders
        .into_iter()
        .map(|(order, items)| {
            let username = usernames.get(&order.user_id).cloned();
            AdminOrderResponse {
                username,
                order: OrderResponse::new(order, items),
            }
        })
        .collect();

    Ok((StatusCode::OK, Json(response)).into_response())
}

//The only mutation an order admits after checkout. Any recognized status
//may be set from any other, including leaving Delivered or Cancelled;
//the admin override stays unrestricted on purpose.
async fn set_order_status(
    Path(id): Path<i32>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<SetOrderStatus>,
) -> Result<Response, ApiError> {
    let status = Status::from_str(&payload.status).map_err(ApiError::Validation)?;

    let txn = db.begin().await?;

    let order_model = order::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No order with {} id was found", id)))?;

    let mut order_model: order::ActiveModel = order_model.into();
    order_model.status = Set(status);
    let updated = order_model.update(&txn).await?;

    let items = order_item::Entity::find()
        .filter(order_item::Column::OrderId.eq(updated.id))
        .order_by_asc(order_item::Column::Id)
        .all(&txn)
        .await?;

    txn.commit().await?;

    Ok((StatusCode::OK, Json(OrderResponse::new(updated, items))).into_response())
}

//structs
#[derive(Deserialize, Debug)]
struct SetOrderStatus {
    status: String,
}

#[derive(Serialize)]
struct AdminOrderResponse {
    username: Option<String>,
    #[serde(flatten)]
    order: OrderResponse,
}
