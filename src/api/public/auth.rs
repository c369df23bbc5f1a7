use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

use crate::api::error::ApiError;
use crate::entities::user::{self, Entity as UserEntity, Role};
use crate::middleware::auth::generate_token;

//ROUTERS
pub fn auth_router(db: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login))
        .layer(Extension(db))
}

//ROUTES
async fn register_user(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<RegisterUser>,
) -> Result<Response, ApiError> {
    payload
        .validate()
        .map_err(|err| ApiError::Validation(err.to_string()))?;

    let password = hash_password(&payload.password).map_err(|_| ApiError::Internal)?;

    let new_user = user::ActiveModel {
        username: Set(payload.username),
        password: Set(password),
        role: Set(Role::User),
        ..Default::default()
    };

    let txn = db.begin().await?;
    match user::Entity::insert(new_user).exec(&txn).await {
        Ok(_) => {
            txn.commit().await?;
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": "User registered successfully"
                })),
            )
                .into_response())
        }
        Err(_) => {
            let _ = txn.rollback().await;
            Err(ApiError::Conflict("Username already exists".to_string()))
        }
    }
}

async fn login(
    Extension(db): Extension<Arc<DatabaseConnection>>,
    Json(payload): Json<UserLogin>,
) -> Result<Response, ApiError> {
    let result = UserEntity::find()
        .filter(user::Column::Username.eq(&*payload.username))
        .one(&*db)
        .await?;

    let model = result.ok_or_else(|| {
        ApiError::Unauthorized("Invalid username or password".to_string())
    })?;

    model
        .check_hash(&payload.password)
        .map_err(|_| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let token = generate_token(model.id, model.role.to_string())
        .await
        .map_err(|_| ApiError::Internal)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "token": token
        })),
    )
        .into_response())
}

//utilities
fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)?
        .to_string();

    Ok(password_hash)
}

//structs
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,32}$").unwrap());

#[derive(Deserialize, Clone, Debug, Validate)]
struct RegisterUser {
    #[validate(regex(path = *USERNAME_REGEX))]
    username: String,
    #[validate(length(min = 8, max = 72))]
    password: String,
}

#[derive(Debug, Deserialize, Clone)]
struct UserLogin {
    username: String,
    password: String,
}
