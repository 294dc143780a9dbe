//! API 路由模块
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录 / 当前用户
//! - [`products`] - 商品目录
//! - [`users`] - 用户管理 (管理员)
//! - [`cart`] - 收银员购物车与结账
//! - [`orders`] - 订单账本与销售报表

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

pub use crate::utils::{AppError, AppResult};
