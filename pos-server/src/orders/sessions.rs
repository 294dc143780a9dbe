//! Per-cashier cart sessions
//!
//! Each authenticated user owns exactly one cart. Sessions are independent:
//! the map only hands out per-user locks, and the lock is held for the whole
//! operation (including the ledger write during checkout), so one session
//! can never submit the same cart twice concurrently.

use std::sync::Arc;

use dashmap::DashMap;
use shared::order::Cart;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default, Clone)]
pub struct CartSessions {
    carts: Arc<DashMap<String, Arc<Mutex<Cart>>>>,
}

impl CartSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the cart of `user_id`, creating an empty one on first use
    pub async fn lock(&self, user_id: &str) -> OwnedMutexGuard<Cart> {
        let cart = self
            .carts
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Cart::new())))
            .clone();
        // DashMap shard guard is released above; only the session mutex is awaited
        cart.lock_owned().await
    }

    /// Drop the session of `user_id`
    pub fn discard(&self, user_id: &str) {
        self.carts.remove(user_id);
    }

    pub fn active_sessions(&self) -> usize {
        self.carts.len()
    }
}
