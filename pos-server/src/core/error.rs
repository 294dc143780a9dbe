//! 服务器启动/运行期错误
//!
//! 请求级错误统一使用 [`shared::error::AppError`]; 这里只覆盖进程边界。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<shared::AppError> for ServerError {
    fn from(err: shared::AppError) -> Self {
        ServerError::Internal(anyhow::anyhow!(err))
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
