//! Cart / checkout engine
//!
//! A [`Cart`] is the in-progress sale of one cashier session. Lines keep
//! insertion order and there is at most one line per product. Every line has
//! `qty >= 1`: decrement floors at 1 and only [`Cart::remove_item`] deletes a
//! line. Totals are recomputed on every call.
//!
//! Checkout validates, snapshots the lines into an [`OrderDraft`], hands it to
//! an [`OrderLedger`] and clears the cart only after the ledger accepted it.
//! Any failure leaves the cart exactly as it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{CartError, CheckoutError};
use super::ledger::OrderLedger;
use super::money::{self, MAX_QUANTITY};
use super::types::{Order, OrderDraft, OrderItem};
use crate::models::Product;

/// One product in the cart, with name and price captured when it was added
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.qty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    tendered: Option<Decimal>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from an already-composed item list (client-side carts)
    ///
    /// Lines are keyed by position since the items carry no product identity.
    pub fn from_items(items: &[OrderItem]) -> Result<Self, CartError> {
        let mut lines = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let product_id = format!("line:{}", idx);
            money::validate_price(item.price).map_err(CartError::InvalidPrice)?;
            if item.qty == 0 {
                return Err(CartError::InvalidQuantity(product_id));
            }
            if item.qty > MAX_QUANTITY {
                return Err(CartError::QuantityExceeded {
                    product_id,
                    max: MAX_QUANTITY,
                });
            }
            lines.push(CartLine {
                product_id,
                name: item.name.clone(),
                price: item.price,
                qty: item.qty,
            });
        }
        Ok(Self {
            lines,
            tendered: None,
        })
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn tendered(&self) -> Option<Decimal> {
        self.tendered
    }

    /// Add one unit of `product`
    ///
    /// Inactive products are rejected.
    pub fn add_item(&mut self, product: &Product) -> Result<&CartLine, CartError> {
        if !product.is_active {
            return Err(CartError::ProductUnavailable(product.id.clone()));
        }
        money::validate_price(product.price).map_err(CartError::InvalidPrice)?;

        match self.position(&product.id) {
            Some(idx) => self.bump(idx),
            None => {
                self.lines.push(CartLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    price: product.price,
                    qty: 1,
                });
                Ok(&self.lines[self.lines.len() - 1])
            }
        }
    }

    pub fn increment(&mut self, product_id: &str) -> Result<&CartLine, CartError> {
        let idx = self.require(product_id)?;
        self.bump(idx)
    }

    /// Decrease by one, never below 1
    pub fn decrement(&mut self, product_id: &str) -> Result<&CartLine, CartError> {
        let idx = self.require(product_id)?;
        let line = &mut self.lines[idx];
        line.qty = line.qty.saturating_sub(1).max(1);
        Ok(line)
    }

    /// Delete the line regardless of its quantity
    pub fn remove_item(&mut self, product_id: &str) -> Result<CartLine, CartError> {
        let idx = self.require(product_id)?;
        Ok(self.lines.remove(idx))
    }

    /// Record the cash offered by the customer (`None` clears it)
    pub fn set_tender(&mut self, cash: Option<Decimal>) -> Result<(), CheckoutError> {
        if let Some(c) = cash {
            validate_tender(c)?;
        }
        self.tendered = cash;
        Ok(())
    }

    /// Σ price × qty
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// `cash - total`; negative when the cash is short
    pub fn change_for(&self, cash: Decimal) -> Decimal {
        cash - self.total()
    }

    /// Change for the recorded tender, if any
    pub fn change(&self) -> Option<Decimal> {
        self.tendered.map(|cash| self.change_for(cash))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.tendered = None;
    }

    /// Validate and snapshot the cart without touching it
    ///
    /// `cash` falls back to the recorded tender.
    pub fn prepare_checkout(
        &self,
        cash: Option<Decimal>,
        cashier: &str,
    ) -> Result<OrderDraft, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let cash = cash.or(self.tendered).ok_or(CheckoutError::MissingTender)?;
        validate_tender(cash)?;

        let total = self.total();
        if cash < total {
            return Err(CheckoutError::InsufficientFunds { total, cash });
        }

        let items = self
            .lines
            .iter()
            .map(|l| OrderItem {
                name: l.name.clone(),
                price: l.price,
                qty: l.qty,
            })
            .collect();

        Ok(OrderDraft {
            items,
            total,
            cash,
            change: cash - total,
            cashier: cashier.to_string(),
            idempotency_key: None,
        })
    }

    /// Validate, persist through `ledger` and reset the cart
    ///
    /// The cart is only cleared once the ledger returned the stored order.
    /// A key this cashier already used returns that order when it records the
    /// same sale, and [`CheckoutError::IdempotencyConflict`] otherwise.
    pub async fn checkout<L>(
        &mut self,
        cash: Option<Decimal>,
        cashier: &str,
        idempotency_key: Option<String>,
        ledger: &L,
    ) -> Result<Order, CheckoutError>
    where
        L: OrderLedger + ?Sized,
    {
        let draft = self
            .prepare_checkout(cash, cashier)?
            .with_idempotency_key(idempotency_key);

        if let Some(key) = draft.idempotency_key.as_deref()
            && let Some(existing) = ledger.find_by_idempotency_key(cashier, key).await?
        {
            if !draft.same_sale(&existing) {
                tracing::warn!(order_id = %existing.id, key, cashier, "Idempotency key reused for a different sale");
                return Err(CheckoutError::IdempotencyConflict(key.to_string()));
            }
            tracing::info!(order_id = %existing.id, key, "Checkout replayed, returning stored order");
            self.clear();
            return Ok(existing);
        }

        let order = ledger.insert(draft).await?;
        self.clear();
        Ok(order)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }

    fn require(&self, product_id: &str) -> Result<usize, CartError> {
        self.position(product_id)
            .ok_or_else(|| CartError::LineNotFound(product_id.to_string()))
    }

    fn bump(&mut self, idx: usize) -> Result<&CartLine, CartError> {
        let line = &mut self.lines[idx];
        if line.qty >= MAX_QUANTITY {
            return Err(CartError::QuantityExceeded {
                product_id: line.product_id.clone(),
                max: MAX_QUANTITY,
            });
        }
        line.qty += 1;
        Ok(line)
    }
}

fn validate_tender(cash: Decimal) -> Result<(), CheckoutError> {
    if cash.is_sign_negative() && !cash.is_zero() {
        return Err(CheckoutError::InvalidTender(format!(
            "cash must be non-negative, got {}",
            cash
        )));
    }
    if !money::has_money_precision(cash) {
        return Err(CheckoutError::InvalidTender(format!(
            "cash must have at most 2 decimal places, got {}",
            cash
        )));
    }
    Ok(())
}

/// Read model of a cart for terminals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: Decimal,
    pub tendered: Option<Decimal>,
    pub change: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
    pub line_total: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart
                .lines
                .iter()
                .map(|l| CartLineView {
                    product_id: l.product_id.clone(),
                    name: l.name.clone(),
                    price: l.price,
                    qty: l.qty,
                    line_total: l.line_total(),
                })
                .collect(),
            total: cart.total(),
            tendered: cart.tendered,
            change: cart.change(),
        }
    }
}
