//! Order API 模块
//!
//! | 路径 | 方法 | 说明 | 权限 |
//! |------|------|------|------|
//! | /api/orders | POST | 提交客户端组好的订单 | 登录 |
//! | /api/orders | GET | 全部订单, `?date=YYYY-MM-DD` 按营业日过滤并汇总 | 登录 |
//! | /api/orders/monthly | GET | 按月汇总 | 管理员 |
//! | /api/orders/weekly | GET | 最近 7 天 | 管理员 |
//! | /api/orders/{id} | GET | 单个订单 | 登录 |

mod handler;
mod view;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub use view::{DailySalesView, OrderView};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    let reports = Router::new()
        .route("/monthly", get(handler::monthly))
        .route("/weekly", get(handler::weekly))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .merge(reports)
}
