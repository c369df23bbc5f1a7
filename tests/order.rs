mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{create_food, create_restaurant, login, request, spawn_app};

async fn fill_cart(router: &axum::Router, token: &str, food_id: i64, quantity: i64) {
    let (status, _) = request(
        router,
        "POST",
        "/api/cart",
        Some(token),
        Some(json!({"food_id": food_id, "quantity": quantity})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn checkout_snapshots_the_cart_and_clears_it() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 2).await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"].as_str(), Some("Pending"));
    assert_eq!(body["payment_method"].as_str(), Some("COD"));
    assert_eq!(body["total_amount"].as_f64(), Some(498.0));
    assert_eq!(body["delivery_address"].as_str(), Some("Street 1"));

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"].as_str(), Some("Plov"));
    assert_eq!(items[0]["price"].as_f64(), Some(249.0));
    assert_eq!(items[0]["quantity"].as_i64(), Some(2));

    //the source cart is gone
    let (_, cart) = request(&app.router, "GET", "/api/cart", Some(&token), None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 0);

    //and an immediate duplicate submission finds nothing to order
    let (status, body) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"].as_str(), Some("empty_cart"));
}

#[tokio::test]
async fn checkout_of_empty_cart_creates_no_order() {
    let app = spawn_app().await;
    let token = login(&app.router, "user").await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1", "payment_method": "COD"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"].as_str(), Some("empty_cart"));

    let (status, body) = request(&app.router, "GET", "/api/order", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn checkout_requires_delivery_address() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 1).await;

    for address in ["", "   "] {
        let (status, body) = request(
            &app.router,
            "POST",
            "/api/order",
            Some(&token),
            Some(json!({"delivery_address": address})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"].as_str(), Some("validation"));
    }

    //the cart was left untouched
    let (_, cart) = request(&app.router, "GET", "/api/cart", Some(&token), None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn order_is_immune_to_later_price_changes() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 1).await;

    let (status, order) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = request(
        &app.router,
        "PATCH",
        &format!("/api/admin/food/{}", food_id),
        Some(&admin_token),
        Some(json!({"price": 299.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, orders) = request(&app.router, "GET", "/api/order", Some(&token), None).await;
    let listed = &orders.as_array().unwrap()[0];
    assert_eq!(listed["id"], order["id"]);
    assert_eq!(listed["total_amount"].as_f64(), Some(249.0));
    assert_eq!(listed["items"][0]["price"].as_f64(), Some(249.0));
}

#[tokio::test]
async fn orders_list_newest_first() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;

    let mut order_ids = Vec::new();
    for _ in 0..2 {
        fill_cart(&app.router, &token, food_id, 1).await;
        let (status, body) = request(
            &app.router,
            "POST",
            "/api/order",
            Some(&token),
            Some(json!({"delivery_address": "Street 1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        order_ids.push(body["id"].as_i64().unwrap());
    }

    let (_, body) = request(&app.router, "GET", "/api/order", Some(&token), None).await;
    let listed: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|order| order["id"].as_i64().unwrap())
        .collect();
    assert_eq!(listed, vec![order_ids[1], order_ids[0]]);
}

#[tokio::test]
async fn online_payment_method_is_recorded() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 1).await;

    let (status, body) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1", "payment_method": "Online"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["payment_method"].as_str(), Some("Online"));
}

#[tokio::test]
async fn admin_sees_all_orders_with_usernames() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 1).await;

    let (status, _) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(&app.router, "GET", "/api/admin/order", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["username"].as_str(), Some("user"));
    assert_eq!(orders[0]["total_amount"].as_f64(), Some(249.0));
}

#[tokio::test]
async fn status_walks_the_delivery_pipeline() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 1).await;

    let (_, order) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    for status_name in ["Preparing", "Out for Delivery", "Delivered"] {
        let (status, body) = request(
            &app.router,
            "PATCH",
            &format!("/api/admin/order/{}/status", order_id),
            Some(&admin_token),
            Some(json!({"status": status_name})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"].as_str(), Some(status_name));
    }
}

#[tokio::test]
async fn unrecognized_status_is_rejected_and_leaves_order_unchanged() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 1).await;

    let (_, order) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let (status, body) = request(
        &app.router,
        "PATCH",
        &format!("/api/admin/order/{}/status", order_id),
        Some(&admin_token),
        Some(json!({"status": "Delivering"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"].as_str(), Some("validation"));

    let (_, orders) = request(&app.router, "GET", "/api/order", Some(&token), None).await;
    assert_eq!(orders[0]["status"].as_str(), Some("Pending"));
}

#[tokio::test]
async fn status_of_unknown_order_is_not_found() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;

    let (status, body) = request(
        &app.router,
        "PATCH",
        "/api/admin/order/4242/status",
        Some(&admin_token),
        Some(json!({"status": "Preparing"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"].as_str(), Some("not_found"));
}

//Terminal states are a policy, not a constraint: the admin override can
//move an order anywhere, and a terminal order stays fully queryable.
#[tokio::test]
async fn terminal_orders_stay_visible_and_untouched_by_cart_activity() {
    let app = spawn_app().await;
    let admin_token = login(&app.router, "admin").await;
    let token = login(&app.router, "user").await;

    let restaurant_id = create_restaurant(&app.router, &admin_token, "Pirozhok").await;
    let food_id = create_food(&app.router, &admin_token, restaurant_id, "Plov", 249.0).await;
    fill_cart(&app.router, &token, food_id, 2).await;

    let (_, order) = request(
        &app.router,
        "POST",
        "/api/order",
        Some(&token),
        Some(json!({"delivery_address": "Street 1"})),
    )
    .await;
    let order_id = order["id"].as_i64().unwrap();

    let (status, _) = request(
        &app.router,
        "PATCH",
        &format!("/api/admin/order/{}/status", order_id),
        Some(&admin_token),
        Some(json!({"status": "Cancelled"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    //cart activity after the fact
    fill_cart(&app.router, &token, food_id, 5).await;
    let (_, _) = request(&app.router, "DELETE", "/api/cart", Some(&token), None).await;

    let (_, orders) = request(&app.router, "GET", "/api/order", Some(&token), None).await;
    let listed = &orders.as_array().unwrap()[0];
    assert_eq!(listed["status"].as_str(), Some("Cancelled"));
    assert_eq!(listed["items"][0]["quantity"].as_i64(), Some(2));
    assert_eq!(listed["total_amount"].as_f64(), Some(498.0));

    //and the permissive machine may resurrect it
    let (status, body) = request(
        &app.router,
        "PATCH",
        &format!("/api/admin/order/{}/status", order_id),
        Some(&admin_token),
        Some(json!({"status": "Pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"].as_str(), Some("Pending"));
}
