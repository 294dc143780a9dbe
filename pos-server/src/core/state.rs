use std::sync::Arc;

use chrono_tz::Tz;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::{OrderRepository, UserRepository};
use crate::orders::CartSessions;
use crate::reports::SalesAggregator;

/// 服务器状态 - 持有所有服务的共享引用
///
/// Clone 只复制 Arc / 句柄, 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | orders | OrderRepository | 订单账本 |
/// | carts | CartSessions | 每个收银员的购物车 |
/// | sales | SalesAggregator | 销售汇总 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务
    pub jwt_service: Arc<JwtService>,
    /// 订单账本
    pub orders: OrderRepository,
    /// 购物车会话
    pub carts: CartSessions,
    /// 销售汇总
    pub sales: SalesAggregator,
}

impl ServerState {
    /// 基于已打开的数据库组装状态
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let orders = OrderRepository::new(db.clone());
        let sales = SalesAggregator::new(Arc::new(orders.clone()), config.timezone);
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config,
            db,
            jwt_service,
            orders,
            carts: CartSessions::new(),
            sales,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/pos.db)
    /// 3. 首次启动时创建管理员
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("pos.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        let state = Self::new(config.clone(), db_service.db);
        state.seed_admin().await?;
        Ok(state)
    }

    /// 内存数据库状态 (测试用)
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db_service = DbService::memory()
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        let state = Self::new(config, db_service.db);
        state.seed_admin().await?;
        Ok(state)
    }

    async fn seed_admin(&self) -> Result<()> {
        let Some(password) = self.config.admin_password.as_deref() else {
            return Ok(());
        };

        UserRepository::new(self.db.clone())
            .ensure_admin(&self.config.admin_username, password)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;
        Ok(())
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// 业务时区
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }
}
