mod common;

use common::{TestApp, num};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_product_crud() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.product(&admin, "Beef Pares", 120.0, "PARES").await;
    assert!(id.starts_with("product:"));

    let (status, body) = app
        .put(&format!("/api/products/{id}"), &admin, json!({ "price": 135.5 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(num(&body["price"]), 135.5);
    assert_eq!(body["name"], "Beef Pares");

    let (status, body) = app.get(&format!("/api/products/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "PARES");
}

#[tokio::test]
async fn test_list_sorted_and_filtered() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    app.product(&admin, "Iced Tea", 25.0, "DRINKS").await;
    app.product(&admin, "Beef Pares", 120.0, "PARES").await;
    app.product(&admin, "Coke", 30.0, "DRINKS").await;

    let (_, all) = app.get("/api/products", &admin).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Beef Pares", "Coke", "Iced Tea"]);

    let (_, drinks) = app.get("/api/products?category=drinks", &admin).await;
    assert_eq!(drinks.as_array().unwrap().len(), 2);

    let (_, everything) = app.get("/api/products?category=ALL", &admin).await;
    assert_eq!(everything.as_array().unwrap().len(), 3);

    let (status, body) = app.get("/api/products?category=DESSERT", &admin).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6005);
}

#[tokio::test]
async fn test_deactivate_hides_product() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.product(&admin, "Goto Special", 90.0, "GOTO").await;

    let (status, body) = app.delete(&format!("/api/products/{id}"), &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_active"], false);

    let (_, active) = app.get("/api/products", &admin).await;
    assert!(active.as_array().unwrap().is_empty());

    let (_, all) = app.get("/api/products?include_inactive=true", &admin).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_product_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/products",
            &admin,
            json!({ "name": "Broken", "price": -1.0, "category": "SOLO" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, body) = app
        .post(
            "/api/products",
            &admin,
            json!({ "name": "  ", "price": 10.0, "category": "SOLO" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);

    let (status, body) = app
        .put("/api/products/product:missing", &admin, json!({ "price": 10.0 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn test_catalog_writes_are_admin_only() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let cashier = app.cashier_token(&admin, "ana").await;

    let (status, body) = app
        .post(
            "/api/products",
            &cashier,
            json!({ "name": "Free Lunch", "price": 0.0, "category": "SOLO" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, _) = app.get("/api/products", &cashier).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .get("/api/products?include_inactive=true", &cashier)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
