//! Order domain: cart engine, order records and the ledger contract
//!
//! - [`Cart`]: mutable in-progress sale owned by one cashier session
//! - [`Order`]: immutable record of a completed sale
//! - [`OrderLedger`]: append-only store of orders

pub mod cart;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;

// Re-exports
pub use cart::{Cart, CartLine, CartLineView, CartView};
pub use error::{CartError, CheckoutError, LedgerError};
pub use ledger::OrderLedger;
pub use types::{Order, OrderDraft, OrderItem};
