//! User API 模块 (管理员)

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", user_routes())
}

fn user_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_admin))
}
