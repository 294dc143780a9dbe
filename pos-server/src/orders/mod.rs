//! Order taking: per-session carts on top of the shared cart engine

pub mod sessions;

pub use sessions::CartSessions;
