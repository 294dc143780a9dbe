//! Order Repository
//!
//! SurrealDB-backed [`OrderLedger`]. Orders are append-only: there is no
//! update or delete.

use async_trait::async_trait;
use shared::order::{LedgerError, Order, OrderDraft, OrderLedger};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, parse_record_id};
use crate::db::models::OrderRecord;

const TABLE: &str = "pos_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert with an explicit creation instant (UTC millis)
    pub async fn insert_at(&self, draft: OrderDraft, created_at: i64) -> Result<Order, LedgerError> {
        let record = OrderRecord::from_draft(draft, created_at);

        let mut result = self
            .base
            .db()
            .query("CREATE pos_order CONTENT $data RETURN AFTER")
            .bind(("data", record))
            .await
            .map_err(unavailable)?;

        let created: Option<OrderRecord> = result.take(0).map_err(unavailable)?;
        let order = created
            .map(Order::from)
            .ok_or_else(|| LedgerError::Unavailable("insert returned no record".to_string()))?;

        tracing::info!(
            order_id = %order.id,
            cashier = %order.cashier,
            total = %order.total,
            items = order.items.len(),
            "Order recorded"
        );
        Ok(order)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let thing = parse_record_id(TABLE, id)?;
        let record: Option<OrderRecord> = self.base.db().select(thing).await?;
        Ok(record.map(Order::from))
    }

    async fn query_orders(
        &self,
        sql: &'static str,
        bindings: Vec<(&'static str, i64)>,
    ) -> Result<Vec<Order>, LedgerError> {
        let mut query = self.base.db().query(sql);
        for binding in bindings {
            query = query.bind(binding);
        }
        let records: Vec<OrderRecord> = query
            .await
            .map_err(unavailable)?
            .take(0)
            .map_err(corrupt)?;
        Ok(records.into_iter().map(Order::from).collect())
    }
}

fn unavailable(err: surrealdb::Error) -> LedgerError {
    LedgerError::Unavailable(err.to_string())
}

fn corrupt(err: surrealdb::Error) -> LedgerError {
    LedgerError::Corrupt(err.to_string())
}

#[async_trait]
impl OrderLedger for OrderRepository {
    async fn insert(&self, draft: OrderDraft) -> Result<Order, LedgerError> {
        self.insert_at(draft, chrono::Utc::now().timestamp_millis())
            .await
    }

    async fn find_between(
        &self,
        start_inclusive: i64,
        end_inclusive: i64,
    ) -> Result<Vec<Order>, LedgerError> {
        self.query_orders(
            r#"SELECT * FROM pos_order
            WHERE created_at >= $start AND created_at <= $end
            ORDER BY created_at DESC"#,
            vec![("start", start_inclusive), ("end", end_inclusive)],
        )
        .await
    }

    async fn find_all(&self) -> Result<Vec<Order>, LedgerError> {
        self.query_orders("SELECT * FROM pos_order ORDER BY created_at DESC", vec![])
            .await
    }

    async fn find_by_idempotency_key(
        &self,
        cashier: &str,
        key: &str,
    ) -> Result<Option<Order>, LedgerError> {
        let records: Vec<OrderRecord> = self
            .base
            .db()
            .query(
                "SELECT * FROM pos_order WHERE idempotency_key = $key AND cashier = $cashier LIMIT 1",
            )
            .bind(("key", key.to_string()))
            .bind(("cashier", cashier.to_string()))
            .await
            .map_err(unavailable)?
            .take(0)
            .map_err(corrupt)?;
        Ok(records.into_iter().next().map(Order::from))
    }
}
