//! Money helpers using rust_decimal for precision
//!
//! All arithmetic is done on `Decimal`. Storage uses `f64` rounded to
//! two decimal places; convert with [`to_decimal`] / [`to_f64`] at the
//! storage boundary only.

use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item (1,000,000)
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum allowed quantity per cart line
pub const MAX_QUANTITY: u32 = 9999;

/// Round to the monetary precision
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a stored f64 into a Decimal
///
/// Non-finite values become zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).map(round_money).unwrap_or_default()
}

/// Convert a Decimal into the f64 used for storage
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// At most two decimal places once trailing zeros are dropped
///
/// Amounts stored with more precision would be rounded field by field and
/// break `total == Σ price × qty` on the stored order.
#[inline]
pub fn has_money_precision(value: Decimal) -> bool {
    value.normalize().scale() <= DECIMAL_PLACES
}

/// A price must be non-negative, have at most two decimals and not exceed
/// [`MAX_PRICE`]
pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(format!("price must be non-negative, got {}", price));
    }
    if !has_money_precision(price) {
        return Err(format!("price must have at most 2 decimal places, got {}", price));
    }
    if price > MAX_PRICE {
        return Err(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        ));
    }
    Ok(())
}
