//! Order JSON views
//!
//! `date` / `time` are derived from `created_at` in the business timezone at
//! the API boundary only; storage keeps the UTC instant.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::order::{Order, OrderItem};

use crate::reports::DailySales;
use crate::utils::time;

#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(rename = "_id")]
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub cash: Decimal,
    pub change: Decimal,
    pub cashier: String,
    /// UTC Unix millis
    pub created_at: i64,
    /// RFC 3339 with the business timezone offset
    pub date: String,
    /// HH:MM:SS, 24h
    pub time: String,
}

impl OrderView {
    pub fn new(order: &Order, tz: Tz) -> Self {
        let local = time::to_local(order.created_at, tz);
        Self {
            id: order.id.clone(),
            items: order.items.clone(),
            total: order.total,
            cash: order.cash,
            change: order.change,
            cashier: order.cashier.clone(),
            created_at: order.created_at,
            date: local.to_rfc3339(),
            time: local.format("%H:%M:%S").to_string(),
        }
    }

    pub fn list(orders: &[Order], tz: Tz) -> Vec<Self> {
        orders.iter().map(|o| Self::new(o, tz)).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySalesView {
    /// YYYY-MM-DD
    pub date: String,
    pub orders: Vec<OrderView>,
    pub total_amount: Decimal,
    pub order_count: usize,
    pub item_count: u64,
}

impl DailySalesView {
    pub fn new(day: &DailySales, tz: Tz) -> Self {
        Self {
            date: day.date.format("%Y-%m-%d").to_string(),
            orders: OrderView::list(&day.orders, tz),
            total_amount: day.total_amount,
            order_count: day.order_count,
            item_count: day.item_count,
        }
    }
}
