//! Order record types
//!
//! An [`Order`] is an immutable snapshot of a completed sale. Items carry
//! name/price/qty copied at add-to-cart time, never a live product reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

/// A validated order that has not been written to the ledger yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub cash: Decimal,
    pub change: Decimal,
    pub cashier: String,
    /// Client-supplied key, scoped to the cashier; replaying it with the same
    /// sale returns the order already written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl OrderDraft {
    pub fn with_idempotency_key(mut self, key: Option<String>) -> Self {
        self.idempotency_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Whether `order` records the same sale: cashier, items, total and cash
    pub fn same_sale(&self, order: &Order) -> bool {
        self.cashier == order.cashier
            && self.items == order.items
            && self.total == order.total
            && self.cash == order.cash
    }

    /// Σ price × qty over the items
    pub fn items_total(items: &[OrderItem]) -> Decimal {
        items.iter().map(OrderItem::line_total).sum()
    }
}

/// A persisted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Record ID ("pos_order:xxx")
    pub id: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub cash: Decimal,
    pub change: Decimal,
    pub cashier: String,
    /// Canonical creation instant, UTC Unix millis
    pub created_at: i64,
}

impl Order {
    /// Sum of quantities over all items
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.qty)).sum()
    }
}
