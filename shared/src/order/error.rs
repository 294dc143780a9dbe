//! Cart and checkout errors
//!
//! | Error | Kind | Cart after failure |
//! |-------|------|--------------------|
//! | [`CartError`] | not-found / validation | unchanged |
//! | [`CheckoutError::EmptyCart`], [`CheckoutError::MissingTender`], [`CheckoutError::InvalidTender`], [`CheckoutError::InsufficientFunds`] | validation | unchanged |
//! | [`CheckoutError::IdempotencyConflict`] | conflict | unchanged |
//! | [`CheckoutError::Persistence`] | ledger failure | unchanged, safe to retry |

use rust_decimal::Decimal;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};
use crate::order::money;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("product {0} is not available")]
    ProductUnavailable(String),

    #[error("product {0} is not in the cart")]
    LineNotFound(String),

    #[error("quantity for {product_id} exceeds maximum allowed ({max})")]
    QuantityExceeded { product_id: String, max: u32 },

    #[error("quantity for {0} must be at least 1")]
    InvalidQuantity(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("no cash tendered")]
    MissingTender,

    #[error("invalid tender: {0}")]
    InvalidTender(String),

    #[error("insufficient cash: total {total}, tendered {cash}")]
    InsufficientFunds { total: Decimal, cash: Decimal },

    #[error("idempotency key {0} was already used for a different sale")]
    IdempotencyConflict(String),

    #[error("order could not be saved: {0}")]
    Persistence(String),
}

/// Failure reported by an order ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    #[error("invalid ledger record: {0}")]
    Corrupt(String),
}

impl From<LedgerError> for CheckoutError {
    fn from(err: LedgerError) -> Self {
        CheckoutError::Persistence(err.to_string())
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductUnavailable(id) => {
                AppError::new(ErrorCode::ProductInactive).with_detail("product_id", id)
            }
            CartError::LineNotFound(id) => {
                AppError::new(ErrorCode::CartLineNotFound).with_detail("product_id", id)
            }
            CartError::QuantityExceeded { product_id, max } => {
                AppError::new(ErrorCode::OrderQuantityExceeded)
                    .with_detail("product_id", product_id)
                    .with_detail("max", max)
            }
            CartError::InvalidQuantity(id) => {
                AppError::new(ErrorCode::OrderInvalidQuantity).with_detail("product_id", id)
            }
            CartError::InvalidPrice(msg) => {
                AppError::with_message(ErrorCode::ProductInvalidPrice, msg)
            }
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => AppError::new(ErrorCode::OrderEmpty),
            CheckoutError::MissingTender => AppError::new(ErrorCode::TenderMissing),
            CheckoutError::InvalidTender(msg) => {
                AppError::with_message(ErrorCode::ValidationFailed, msg)
            }
            CheckoutError::InsufficientFunds { total, cash } => {
                AppError::new(ErrorCode::PaymentInsufficientAmount)
                    .with_detail("total", money::to_f64(total))
                    .with_detail("cash", money::to_f64(cash))
                    .with_detail("change", money::to_f64(cash - total))
            }
            CheckoutError::IdempotencyConflict(key) => {
                AppError::new(ErrorCode::IdempotencyConflict).with_detail("idempotency_key", key)
            }
            CheckoutError::Persistence(msg) => AppError::database(msg),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_reports_negative_change() {
        let err: AppError = CheckoutError::InsufficientFunds {
            total: Decimal::from(265),
            cash: Decimal::from(200),
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentInsufficientAmount);
        let details = err.details.unwrap();
        assert_eq!(details["change"], -65.0);
    }

    #[test]
    fn test_persistence_maps_to_database_error() {
        let err: CheckoutError = LedgerError::Unavailable("connection refused".into()).into();
        assert!(matches!(err, CheckoutError::Persistence(_)));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
    }
}
