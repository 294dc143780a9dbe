//! Cart API 模块
//!
//! 每个登录用户有且只有一个购物车, 按 JWT 中的用户 ID 区分。
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/cart | GET | 当前购物车 |
//! | /api/cart | DELETE | 清空 |
//! | /api/cart/items | POST | 加入商品 `{product_id}` |
//! | /api/cart/items/{product_id}/increment | POST | +1 |
//! | /api/cart/items/{product_id}/decrement | POST | -1 (最少 1) |
//! | /api/cart/items/{product_id} | DELETE | 删除行 |
//! | /api/cart/tender | PUT | 收款金额 `{cash}` |
//! | /api/cart/checkout | POST | 结账 `{cash?, idempotency_key?}` |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).delete(handler::clear))
        .route("/items", post(handler::add_item))
        .route("/items/{product_id}", delete(handler::remove_item))
        .route("/items/{product_id}/increment", post(handler::increment))
        .route("/items/{product_id}/decrement", post(handler::decrement))
        .route("/tender", put(handler::set_tender))
        .route("/checkout", post(handler::checkout))
}
