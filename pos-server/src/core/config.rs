use std::path::PathBuf;

use chrono_tz::Tz;

use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// 默认业务时区
pub const DEFAULT_TIMEZONE: &str = "Asia/Manila";

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (`.env` 文件由 `setup_environment` 加载)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 5000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | BUSINESS_TIMEZONE | Asia/Manila | 营业日/月报所用的 IANA 时区 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
/// | ADMIN_USERNAME | admin | 首次启动时创建的管理员 |
/// | ADMIN_PASSWORD | (无) | 首次启动时创建的管理员密码 |
///
/// JWT 相关变量见 [`JwtConfig`]。
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pos HTTP_PORT=8080 BUSINESS_TIMEZONE=Asia/Manila cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 业务时区 (日报区间、月份分组、订单 date/time 展示)
    pub timezone: Tz,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
    /// 初始管理员账号
    pub admin_username: String,
    /// 初始管理员密码; 未设置时不创建
    pub admin_password: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的项使用默认值; 无法识别的时区名称返回配置错误。
    pub fn from_env() -> Result<Self> {
        let tz_name =
            std::env::var("BUSINESS_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.into());

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: env_parse("HTTP_PORT", 5000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            timezone: parse_timezone(&tz_name)?,
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30000),
            shutdown_timeout_ms: env_parse("SHUTDOWN_TIMEOUT_MS", 10000),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
        })
    }

    /// 测试用配置: 固定时区, 不读取环境变量
    pub fn for_tests(jwt: JwtConfig, timezone: Tz) -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            jwt,
            environment: "test".into(),
            timezone,
            request_timeout_ms: 30000,
            shutdown_timeout_ms: 1000,
            admin_username: "admin".into(),
            admin_password: None,
        }
    }

    /// 数据库目录: {work_dir}/database
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 日志目录: {work_dir}/logs
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// 解析 IANA 时区名称
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ServerError::Config(format!("Unknown timezone: {}", name)))
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
