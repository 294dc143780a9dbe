//! Pares POS Server - 单店收银服务
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、错误、HTTP 服务器
//! ├── auth/          # JWT 认证、管理员校验
//! ├── db/            # 嵌入式 SurrealDB 与 repository
//! ├── orders/        # 收银员购物车会话
//! ├── reports/       # 日/周/月销售汇总
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装与中间件
//! └── utils/         # 日志、时间、错误 re-export
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod reports;
pub mod routes;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerError, ServerState};
pub use routes::build_app;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境: 加载 `.env`, 初始化日志
///
/// | 环境变量 | 说明 |
/// |----------|------|
/// | LOG_LEVEL | 默认日志级别 (RUST_LOG 优先) |
/// | LOG_FORMAT | `json` 时输出结构化日志 |
/// | LOG_DIR | 设置后额外按天滚动写入文件 |
pub fn setup_environment() -> Result<(), ServerError> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(ServerError::Config(format!("Failed to load .env: {}", e)));
    }

    let log_level = std::env::var("LOG_LEVEL").ok();
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    let log_dir = std::env::var("LOG_DIR").ok().map(std::path::PathBuf::from);
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(log_level.as_deref(), json, log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____                        ____  ____  _____
   / __ \____ _________  _____ / __ \/ __ \/ ___/
  / /_/ / __ `/ ___/ _ \/ ___// /_/ / / / /\__ \
 / ____/ /_/ / /  /  __(__  )/ ____/ /_/ /___/ /
/_/    \__,_/_/   \___/____//_/    \____//____/
    "#
    );
}
