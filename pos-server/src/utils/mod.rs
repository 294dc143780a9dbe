//! 工具模块
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`logger`] - 日志初始化
//! - [`time`] - 业务时区换算

pub mod error;
pub mod logger;
pub mod time;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
