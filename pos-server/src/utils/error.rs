//! 统一错误处理
//!
//! 错误类型统一来自 [`shared::error`], 领域错误 (`CartError`, `CheckoutError`,
//! `LedgerError`, `RepoError`) 都实现了 `Into<AppError>`, handler 里直接 `?`。
//!
//! ```ignore
//! let product = repo
//!     .find_by_id(&id)
//!     .await?
//!     .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound))?;
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
