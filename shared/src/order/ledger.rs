//! Order ledger contract
//!
//! The ledger is append-only: orders are inserted once and never updated or
//! deleted. Queries return orders newest first.

use async_trait::async_trait;

use super::error::LedgerError;
use super::types::{Order, OrderDraft};

#[async_trait]
pub trait OrderLedger: Send + Sync {
    /// Persist a draft, assigning its id and `created_at`
    async fn insert(&self, draft: OrderDraft) -> Result<Order, LedgerError>;

    /// Orders with `start <= created_at <= end` (UTC millis), newest first
    async fn find_between(
        &self,
        start_inclusive: i64,
        end_inclusive: i64,
    ) -> Result<Vec<Order>, LedgerError>;

    /// Every order, newest first
    async fn find_all(&self) -> Result<Vec<Order>, LedgerError>;

    /// Order previously written by `cashier` with this idempotency key, if any
    async fn find_by_idempotency_key(
        &self,
        cashier: &str,
        key: &str,
    ) -> Result<Option<Order>, LedgerError>;
}
