use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::entities::user::{self, Entity as UserEntity, Role};
use crate::middleware::auth::Claims;

//ROUTERS
pub fn admin_user_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/user", get(get_users))
        .route("/user/:id", patch(patch_user_role).delete(delete_user))
        .layer(Extension(db))
}

//ROUTES
async fn get_users(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Query(query): Query<UsersQuery>,
) -> Result<Response, ApiError> {
    let mut user_finder = UserEntity::find();

    if let Some(role) = query.role {
        user_finder = user_finder.filter(user::Column::Role.eq(role));
    }

    if let Some(query) = query.query {
        let mut query_condition =
            Condition::any().add(user::Column::Username.contains(query.clone()));
        if let Ok(id) = query.parse::<i32>() {
            query_condition = query_condition.add(user::Column::Id.eq(id));
        }

        user_finder = user_finder.filter(query_condition);
    }

    //the password hash never leaves the database
    let users: Vec<AdminUserResponse> = user_finder
        .order_by_asc(user::Column::Id)
        .select_only()
        .column_as(user::Column::Id, "id")
        .column_as(user::Column::Username, "username")
        .column_as(user::Column::Role, "role")
        .into_model::<AdminUserResponse>()
        .all(&*db)
        .await?;

    Ok((StatusCode::OK, Json(users)).into_response())
}

async fn patch_user_role(
    Path(id): Path<i32>,
    Extension(claims): Extension<Claims>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<PatchUserRole>,
) -> Result<Response, ApiError> {
    if claims.user_id == id {
        return Err(ApiError::Validation(
            "You cannot change your own role".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let model = UserEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with {} id was found", id)))?;

    let mut model: user::ActiveModel = model.into();
    model.role = Set(payload.role);
    let updated = model.update(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(AdminUserResponse {
            id: updated.id,
            username: updated.username,
            role: updated.role,
        }),
    )
        .into_response())
}

async fn delete_user(
    Path(id): Path<i32>,
    Extension(claims): Extension<Claims>,
    Extension(db): Extension<Arc<DatabaseConnection>>,
) -> Result<Response, ApiError> {
    if claims.user_id == id {
        return Err(ApiError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }

    let txn = db.begin().await?;

    let model = UserEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No user with {} id was found", id)))?;

    let model: user::ActiveModel = model.into();
    model.delete(&txn).await?;
    txn.commit().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "User removed"
        })),
    )
        .into_response())
}

//structs
#[derive(Deserialize, Serialize, FromQueryResult)]
struct AdminUserResponse {
    id: i32,
    username: String,
    role: Role,
}

#[derive(Debug, Deserialize)]
struct PatchUserRole {
    role: Role,
}

#[derive(Deserialize)]
struct UsersQuery {
    query: Option<String>,
    role: Option<Role>,
}
