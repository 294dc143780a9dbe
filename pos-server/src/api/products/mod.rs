//! Product API 模块
//!
//! 读取对所有登录用户开放; 写操作需要管理员。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list).merge(
                post(handler::create).layer(middleware::from_fn(require_admin)),
            ),
        )
        .route(
            "/{id}",
            get(handler::get_by_id).merge(
                put(handler::update)
                    .delete(handler::deactivate)
                    .layer(middleware::from_fn(require_admin)),
            ),
        )
}
