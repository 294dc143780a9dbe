mod common;

use common::{TestApp, num};
use http::StatusCode;
use serde_json::{Value, json};

struct Counter {
    app: TestApp,
    cashier: String,
    pares: String,
    tea: String,
}

/// Cashier "ana" with Beef Pares (120) and Iced Tea (25) in the catalog
async fn counter() -> Counter {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let pares = app.product(&admin, "Beef Pares", 120.0, "PARES").await;
    let tea = app.product(&admin, "Iced Tea", 25.0, "DRINKS").await;
    let cashier = app.cashier_token(&admin, "ana").await;
    Counter {
        app,
        cashier,
        pares,
        tea,
    }
}

impl Counter {
    async fn add(&self, product_id: &str) -> (StatusCode, Value) {
        self.app
            .post(
                "/api/cart/items",
                &self.cashier,
                json!({ "product_id": product_id }),
            )
            .await
    }

    /// PARES x2 + DRINKS x1
    async fn fill(&self) {
        self.add(&self.pares).await;
        self.add(&self.pares).await;
        let (status, cart) = self.add(&self.tea).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(num(&cart["total"]), 265.0);
    }

    async fn cart(&self) -> Value {
        self.app.get("/api/cart", &self.cashier).await.1
    }
}

#[tokio::test]
async fn test_checkout_happy_path() {
    let c = counter().await;
    c.fill().await;

    let (status, cart) = c
        .app
        .put("/api/cart/tender", &c.cashier, json!({ "cash": 300 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(num(&cart["change"]), 35.0);

    let (status, order) = c.app.post("/api/cart/checkout", &c.cashier, json!({})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(num(&order["total"]), 265.0);
    assert_eq!(num(&order["cash"]), 300.0);
    assert_eq!(num(&order["change"]), 35.0);
    assert_eq!(order["cashier"], "ana");
    assert_eq!(order["items"].as_array().unwrap().len(), 2);
    assert_eq!(order["items"][0]["name"], "Beef Pares");
    assert_eq!(order["items"][0]["qty"], 2);
    assert!(order["_id"].as_str().unwrap().starts_with("pos_order:"));
    assert!(order["date"].as_str().unwrap().ends_with("+08:00"));

    let cart = c.cart().await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
    assert_eq!(num(&cart["total"]), 0.0);

    let (status, fetched) = c
        .app
        .get(&format!("/api/orders/{}", order["_id"].as_str().unwrap()), &c.cashier)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, order);
}

#[tokio::test]
async fn test_insufficient_cash_keeps_cart() {
    let c = counter().await;
    c.fill().await;
    let before = c.cart().await;

    let (status, body) = c
        .app
        .post("/api/cart/checkout", &c.cashier, json!({ "cash": 200 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5002);
    assert_eq!(num(&body["details"]["change"]), -65.0);

    assert_eq!(c.cart().await, before);
    let (_, orders) = c.app.get("/api/orders", &c.cashier).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_validation_errors() {
    let c = counter().await;

    let (status, body) = c
        .app
        .post("/api/cart/checkout", &c.cashier, json!({ "cash": 100 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);

    c.fill().await;
    let (status, body) = c.app.post("/api/cart/checkout", &c.cashier, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5006);

    let (status, _) = c
        .app
        .put("/api/cart/tender", &c.cashier, json!({ "cash": -5 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(num(&c.cart().await["total"]), 265.0);
}

#[tokio::test]
async fn test_line_operations() {
    let c = counter().await;
    c.fill().await;

    let uri = |op: &str| format!("/api/cart/items/{}/{op}", c.tea);
    let (_, cart) = c.app.post(&uri("increment"), &c.cashier, json!({})).await;
    assert_eq!(num(&cart["total"]), 290.0);

    c.app.post(&uri("decrement"), &c.cashier, json!({})).await;
    let (_, cart) = c.app.post(&uri("decrement"), &c.cashier, json!({})).await;
    assert_eq!(cart["lines"][1]["qty"], 1);
    assert_eq!(num(&cart["total"]), 265.0);

    let (status, cart) = c
        .app
        .delete(&format!("/api/cart/items/{}", c.pares), &c.cashier)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["lines"].as_array().unwrap().len(), 1);
    assert_eq!(num(&cart["total"]), 25.0);

    let (status, body) = c
        .app
        .post(
            &format!("/api/cart/items/{}/increment", c.pares),
            &c.cashier,
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4101);

    let (_, cart) = c.app.delete("/api/cart", &c.cashier).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_inactive_or_missing_product_rejected() {
    let c = counter().await;
    let admin = c.app.admin_token().await;
    c.app.delete(&format!("/api/products/{}", c.tea), &admin).await;

    let (status, body) = c.add(&c.tea).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6004);

    let (status, body) = c.add("product:ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    assert!(c.cart().await["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sessions_are_per_user() {
    let c = counter().await;
    let admin = c.app.admin_token().await;
    let other = c.app.cashier_token(&admin, "ben").await;
    c.fill().await;

    let (_, cart) = c.app.get("/api/cart", &other).await;
    assert!(cart["lines"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_idempotent_checkout() {
    let c = counter().await;
    c.fill().await;
    let request = json!({ "cash": 300, "idempotency_key": "till-1-0042" });

    let (status, first) = c.app.post("/api/cart/checkout", &c.cashier, request.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    // Terminal retried after a lost response
    c.fill().await;
    let (status, second) = c.app.post("/api/cart/checkout", &c.cashier, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["_id"], first["_id"]);

    let (_, orders) = c.app.get("/api/orders", &c.cashier).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_reused_key_never_drops_a_sale() {
    let c = counter().await;
    let admin = c.app.admin_token().await;
    let ben = c.app.cashier_token(&admin, "ben").await;
    let key = "till-1-0042";

    c.fill().await;
    let (status, first) = c
        .app
        .post(
            "/api/cart/checkout",
            &c.cashier,
            json!({ "cash": 300, "idempotency_key": key }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Another cashier picking the same key gets their own order
    c.app
        .post("/api/cart/items", &ben, json!({ "product_id": c.tea }))
        .await;
    let (status, order) = c
        .app
        .post(
            "/api/cart/checkout",
            &ben,
            json!({ "cash": 25, "idempotency_key": key }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(order["_id"], first["_id"]);
    assert_eq!(order["cashier"], "ben");
    assert_eq!(num(&order["total"]), 25.0);

    // Same cashier, same key, different sale: rejected and the cart survives
    c.add(&c.tea).await;
    let before = c.cart().await;
    let (status, body) = c
        .app
        .post(
            "/api/cart/checkout",
            &c.cashier,
            json!({ "cash": 25, "idempotency_key": key }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4104);
    assert_eq!(c.cart().await, before);

    let (_, orders) = c.app.get("/api/orders", &admin).await;
    assert_eq!(orders.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_client_order_validation() {
    let c = counter().await;

    let (status, body) = c
        .app
        .post(
            "/api/orders",
            &c.cashier,
            json!({ "items": [{ "name": "Rice", "price": 0.005, "qty": 2 }], "total": 0.01, "cash": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);

    let (status, body) = c
        .app
        .post(
            "/api/orders",
            &c.cashier,
            json!({ "items": [{ "name": "Rice", "price": 15, "qty": 0 }], "total": 0, "cash": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4105);

    let (_, orders) = c.app.get("/api/orders", &c.cashier).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_client_composed_order() {
    let c = counter().await;
    let items = json!([
        { "name": "Beef Pares", "price": 120, "qty": 2 },
        { "name": "Iced Tea", "price": 25, "qty": 1 }
    ]);

    let (status, body) = c
        .app
        .post(
            "/api/orders",
            &c.cashier,
            json!({ "items": items, "total": 250, "cash": 300, "change": 50, "cashier": "ana" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4102);

    let (status, order) = c
        .app
        .post(
            "/api/orders",
            &c.cashier,
            json!({ "items": items, "total": 265, "cash": 300, "change": 35, "cashier": "someone-else" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["cashier"], "ana");
    assert_eq!(num(&order["change"]), 35.0);

    let (status, body) = c
        .app
        .post(
            "/api/orders",
            &c.cashier,
            json!({ "items": items, "total": 265, "cash": 200 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5002);
}
