//! Shared types for the POS
//!
//! Domain types used by both the server and terminals: error codes and the
//! API envelope, catalog and user models, and the order domain (cart engine,
//! order records and the ledger contract).

pub mod error;
pub mod models;
pub mod order;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
