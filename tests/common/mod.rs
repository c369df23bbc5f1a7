#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use rust_tarelochka::api::create_api_router;
use rust_tarelochka::entities::{primary_setup, setup_schema};

pub struct TestApp {
    pub router: Router,
    pub db: Arc<DatabaseConnection>,
}

//Boots the real router over a fresh in-memory database. A single pooled
//connection keeps every handler on the same sqlite instance.
pub async fn spawn_app() -> TestApp {
    std::env::set_var("SECRET", "integration-test-secret");

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await;

    let db = Arc::new(db);
    primary_setup(db.clone()).await;

    TestApp {
        router: create_api_router(db.clone()),
        db,
    }
}

pub async fn request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    };

    (status, body)
}

//`primary_setup` seeds "user" and "admin", both with this password.
pub async fn login(router: &Router, username: &str) -> String {
    let (status, body) = request(
        router,
        "POST",
        "/api/login",
        None,
        Some(json!({
            "username": username,
            "password": "Secret15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    body["token"]
        .as_str()
        .expect("Token not found in login response")
        .to_string()
}

pub async fn create_restaurant(router: &Router, admin_token: &str, name: &str) -> i64 {
    let (status, body) = request(
        router,
        "POST",
        "/api/admin/restaurant",
        Some(admin_token),
        Some(json!({
            "name": name,
            "address": "1 Test Street"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["id"].as_i64().expect("Restaurant id missing")
}

pub async fn create_food(
    router: &Router,
    admin_token: &str,
    restaurant_id: i64,
    name: &str,
    price: f64,
) -> i64 {
    let (status, body) = request(
        router,
        "POST",
        "/api/admin/food",
        Some(admin_token),
        Some(json!({
            "restaurant_id": restaurant_id,
            "name": name,
            "price": price,
            "category": "main"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["id"].as_i64().expect("Food id missing")
}
