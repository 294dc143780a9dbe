//! Repository Module
//!
//! CRUD over SurrealDB tables. IDs cross the API as "table:key" strings.

pub mod order;
pub mod product;
pub mod user;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use shared::{AppError, ErrorCode};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse "table:key" (or a bare key) into a record id of `table`
pub(crate) fn parse_record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if !id.contains(':') {
        if id.is_empty() {
            return Err(RepoError::Validation("Empty ID".to_string()));
        }
        return Ok(RecordId::from_table_key(table, id));
    }

    let thing: RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
    if thing.table() != table {
        return Err(RepoError::Validation(format!(
            "ID {} does not belong to {}",
            id, table
        )));
    }
    Ok(thing)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = parse_record_id("product", "product:abc").unwrap();
        assert_eq!(id.table(), "product");

        let bare = parse_record_id("product", "abc").unwrap();
        assert_eq!(bare, id);

        assert!(matches!(
            parse_record_id("product", "pos_user:abc"),
            Err(RepoError::Validation(_))
        ));
        assert!(parse_record_id("product", "").is_err());
    }
}
