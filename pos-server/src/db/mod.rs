//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, in-memory engine for tests.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "pos";
const DATABASE: &str = "pos";

/// Indexes the repositories rely on; idempotent
const SCHEMA: &str = r#"
    DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS pos_user SCHEMALESS;
    DEFINE TABLE IF NOT EXISTS pos_order SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS pos_user_username ON TABLE pos_user FIELDS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS pos_order_created_at ON TABLE pos_order FIELDS created_at;
    DEFINE INDEX IF NOT EXISTS pos_order_cashier_key ON TABLE pos_order FIELDS cashier, idempotency_key;
"#;

/// Database service, owns the SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        tracing::info!(path = %db_path, "Database connection established (RocksDB)");
        Self::prepare(db).await
    }

    /// Volatile in-memory database
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|r| r.check())
            .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
        tracing::info!("Database schema ready");

        Ok(Self { db })
    }
}
