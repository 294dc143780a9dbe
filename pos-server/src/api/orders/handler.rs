//! Order API Handlers

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::{Cart, OrderItem, OrderLedger};

use super::view::{DailySalesView, OrderView};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::reports::DayTotal;
use crate::utils::{AppError, AppResult, ErrorCode, time};

/// Order composed on the terminal
///
/// `cashier` is accepted for compatibility but ignored: the cashier is the
/// authenticated user.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub cash: Decimal,
    #[serde(default)]
    pub change: Option<Decimal>,
    #[serde(default)]
    pub cashier: Option<String>,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Business day, YYYY-MM-DD
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OrdersResponse {
    All(Vec<OrderView>),
    Daily(DailySalesView),
}

/// POST /api/orders
///
/// Totals are recomputed on the server; a client total or change that does
/// not match is rejected.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<OrderView>)> {
    if let Some(claimed) = req.cashier.as_deref()
        && claimed != user.username
    {
        tracing::debug!(claimed, cashier = %user.username, "Ignoring client-supplied cashier");
    }

    let mut cart = Cart::from_items(&req.items)?;
    let total = cart.total();
    if total != req.total {
        return Err(mismatch("total", req.total, total));
    }
    if let Some(change) = req.change
        && req.cash >= total
        && change != req.cash - total
    {
        return Err(mismatch("change", change, req.cash - total));
    }

    let order = cart
        .checkout(Some(req.cash), &user.username, req.idempotency_key, &state.orders)
        .await?;

    Ok((StatusCode::CREATED, Json(OrderView::new(&order, state.timezone()))))
}

fn mismatch(field: &str, claimed: Decimal, computed: Decimal) -> AppError {
    AppError::new(ErrorCode::OrderTotalMismatch)
        .with_detail("field", field)
        .with_detail("claimed", claimed.to_string())
        .with_detail("computed", computed.to_string())
}

/// GET /api/orders[?date=YYYY-MM-DD]
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<OrdersResponse>> {
    let tz = state.timezone();
    match query.date.as_deref() {
        Some(raw) => {
            let date = time::parse_date(raw)?;
            let day = state.sales.daily_sales(date).await?;
            Ok(Json(OrdersResponse::Daily(DailySalesView::new(&day, tz))))
        }
        None => {
            let orders = state.orders.find_all().await?;
            Ok(Json(OrdersResponse::All(OrderView::list(&orders, tz))))
        }
    }
}

/// GET /api/orders/monthly
pub async fn monthly(State(state): State<ServerState>) -> AppResult<Json<BTreeMap<String, Decimal>>> {
    Ok(Json(state.sales.monthly_sales().await?))
}

/// GET /api/orders/weekly
pub async fn weekly(State(state): State<ServerState>) -> AppResult<Json<Vec<DayTotal>>> {
    let today = time::today(state.timezone());
    Ok(Json(state.sales.weekly_sales(today).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let order = state
        .orders
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("order_id", id.clone()))?;
    Ok(Json(OrderView::new(&order, state.timezone())))
}
