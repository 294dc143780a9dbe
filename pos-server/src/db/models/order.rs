//! Order Model

use serde::{Deserialize, Serialize};
use shared::order::{Order, OrderDraft, OrderItem, money};
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub name: String,
    pub price: f64,
    pub qty: u32,
}

/// Stored order; `created_at` is UTC Unix millis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub items: Vec<OrderItemRecord>,
    pub total: f64,
    pub cash: f64,
    pub change: f64,
    pub cashier: String,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl OrderRecord {
    pub fn from_draft(draft: OrderDraft, created_at: i64) -> Self {
        Self {
            id: None,
            items: draft
                .items
                .into_iter()
                .map(|i| OrderItemRecord {
                    name: i.name,
                    price: money::to_f64(i.price),
                    qty: i.qty,
                })
                .collect(),
            total: money::to_f64(draft.total),
            cash: money::to_f64(draft.cash),
            change: money::to_f64(draft.change),
            cashier: draft.cashier,
            created_at,
            idempotency_key: draft.idempotency_key,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: super::id_string(&record.id),
            items: record
                .items
                .into_iter()
                .map(|i| OrderItem {
                    name: i.name,
                    price: money::to_decimal(i.price),
                    qty: i.qty,
                })
                .collect(),
            total: money::to_decimal(record.total),
            cash: money::to_decimal(record.cash),
            change: money::to_decimal(record.change),
            cashier: record.cashier,
            created_at: record.created_at,
        }
    }
}
