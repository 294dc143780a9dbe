//! In-process test harness: in-memory SurrealDB, router driven with `oneshot`

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use pos_server::auth::JwtConfig;
use pos_server::{Config, ServerState, build_app};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin-pass";

pub struct TestApp {
    pub state: ServerState,
    pub app: Router,
}

impl TestApp {
    /// Fresh app (Asia/Manila business timezone) with a seeded admin
    pub async fn new() -> Self {
        let mut config = Config::for_tests(JwtConfig::for_tests(), chrono_tz::Asia::Manila);
        config.admin_username = ADMIN_USER.into();
        config.admin_password = Some(ADMIN_PASS.into());

        let state = ServerState::in_memory(config)
            .await
            .expect("failed to build in-memory state");
        let app = build_app(&state);
        Self { state, app }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USER, ADMIN_PASS).await
    }

    /// Create a cashier account and log in as it
    pub async fn cashier_token(&self, admin: &str, username: &str) -> String {
        let (status, body) = self
            .post(
                "/api/users",
                admin,
                json!({ "username": username, "password": "cashier-pass", "role": "cashier" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "user creation failed: {body}");
        self.login(username, "cashier-pass").await
    }

    /// Create a product and return its id
    pub async fn product(&self, admin: &str, name: &str, price: f64, category: &str) -> String {
        let (status, body) = self
            .post(
                "/api/products",
                admin,
                json!({ "name": name, "price": price, "category": category }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "product creation failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }
}

/// Numeric JSON field as f64 (money is serialized as a number)
pub fn num(value: &Value) -> f64 {
    value.as_f64().unwrap_or_else(|| panic!("not a number: {value}"))
}
