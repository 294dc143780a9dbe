//! Cart API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::order::CartView;

use crate::api::orders::OrderView;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: String,
}

#[derive(Debug, Deserialize)]
pub struct TenderRequest {
    /// `null` clears the tender
    pub cash: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    /// Falls back to the tender recorded on the cart
    #[serde(default)]
    pub cash: Option<Decimal>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

/// GET /api/cart
pub async fn get_cart(State(state): State<ServerState>, user: CurrentUser) -> Json<CartView> {
    let cart = state.carts.lock(&user.id).await;
    Json(CartView::from(&*cart))
}

/// DELETE /api/cart
pub async fn clear(State(state): State<ServerState>, user: CurrentUser) -> Json<CartView> {
    let mut cart = state.carts.lock(&user.id).await;
    cart.clear();
    Json(CartView::from(&*cart))
}

/// POST /api/cart/items
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<AddItemRequest>,
) -> AppResult<Json<CartView>> {
    let product = ProductRepository::new(state.get_db())
        .find_by_id(&req.product_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", req.product_id.clone())
        })?;

    let mut cart = state.carts.lock(&user.id).await;
    cart.add_item(&product)?;
    Ok(Json(CartView::from(&*cart)))
}

/// POST /api/cart/items/{product_id}/increment
pub async fn increment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let mut cart = state.carts.lock(&user.id).await;
    cart.increment(&product_id)?;
    Ok(Json(CartView::from(&*cart)))
}

/// POST /api/cart/items/{product_id}/decrement
pub async fn decrement(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let mut cart = state.carts.lock(&user.id).await;
    cart.decrement(&product_id)?;
    Ok(Json(CartView::from(&*cart)))
}

/// DELETE /api/cart/items/{product_id}
pub async fn remove_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(product_id): Path<String>,
) -> AppResult<Json<CartView>> {
    let mut cart = state.carts.lock(&user.id).await;
    cart.remove_item(&product_id)?;
    Ok(Json(CartView::from(&*cart)))
}

/// PUT /api/cart/tender
pub async fn set_tender(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<TenderRequest>,
) -> AppResult<Json<CartView>> {
    let mut cart = state.carts.lock(&user.id).await;
    cart.set_tender(req.cash)?;
    Ok(Json(CartView::from(&*cart)))
}

/// POST /api/cart/checkout
///
/// The session lock is held across the ledger write; the cart is cleared only
/// after the order was stored.
pub async fn checkout(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<(StatusCode, Json<OrderView>)> {
    let mut cart = state.carts.lock(&user.id).await;
    let order = cart
        .checkout(req.cash, &user.username, req.idempotency_key, &state.orders)
        .await
        .inspect_err(|e| tracing::warn!(user = %user.username, error = %e, "Checkout rejected"))?;

    tracing::info!(
        order_id = %order.id,
        cashier = %order.cashier,
        total = %order.total,
        change = %order.change,
        "Checkout completed"
    );
    Ok((StatusCode::CREATED, Json(OrderView::new(&order, state.timezone()))))
}
