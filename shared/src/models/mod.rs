//! Data models shared between the server and terminals
//!
//! IDs are SurrealDB record IDs rendered as `"table:key"` strings.

pub mod product;
pub mod user;

pub use product::{Product, ProductCategory, ProductCreate, ProductUpdate};
pub use user::{LoginRequest, LoginResponse, User, UserCreate, UserRole};
