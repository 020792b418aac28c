//! Order status constants and the pure planning stage of order fulfillment.
//!
//! [`plan_order`] turns a cart snapshot plus freshly read stock levels into a
//! priced [`OrderPlan`]. The repository runs it inside the fulfillment
//! transaction, after the product rows are locked, so the stock levels it
//! sees are still true at commit time.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::{ensure_in_stock, line_total};
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status assigned to every newly created order.
///
/// Statuses are stored as free text so later lifecycle states (shipped,
/// cancelled, refunded, ...) need no schema change.
pub const ORDER_STATUS_PLACED: &str = "PLACED";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// One line of the cart being converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: DbId,
    pub quantity: i32,
}

/// Stock ledger entry for a product as read inside the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockLevel {
    pub product_id: DbId,
    pub price: Decimal,
    pub available: i32,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A single priced line, ready to be written as an order item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedItem {
    pub product_id: DbId,
    pub quantity: i32,
    /// Price per unit, fixed at planning time.
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// A fully validated and priced order, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderPlan {
    pub items: Vec<PlannedItem>,
    pub total: Decimal,
}

impl OrderPlan {
    /// Units to take out of stock per product, summed across lines.
    pub fn stock_deductions(&self) -> HashMap<DbId, i32> {
        let mut out = HashMap::new();
        for item in &self.items {
            *out.entry(item.product_id).or_insert(0) += item.quantity;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Validate every cart line against `stock` and price the result.
///
/// Fails as a whole on the first problem:
/// - [`CoreError::EmptyCart`] if `lines` is empty.
/// - [`CoreError::NotFound`] if a line references a product missing from `stock`.
/// - [`CoreError::InsufficientStock`] if any line asks for more than is left.
///
/// Lines naming the same product draw from one shared pool of stock.
pub fn plan_order(lines: &[CartLine], stock: &[StockLevel]) -> Result<OrderPlan, CoreError> {
    if lines.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let mut remaining: HashMap<DbId, StockLevel> =
        stock.iter().map(|level| (level.product_id, *level)).collect();

    let mut items = Vec::with_capacity(lines.len());
    for line in lines {
        let level = remaining
            .get_mut(&line.product_id)
            .ok_or_else(|| CoreError::not_found("Product", line.product_id))?;

        ensure_in_stock(line.product_id, line.quantity, level.available)?;
        level.available -= line.quantity;

        items.push(PlannedItem {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: level.price,
            line_total: line_total(level.price, line.quantity),
        });
    }

    let total = items.iter().map(|item| item.line_total).sum();
    Ok(OrderPlan { items, total })
}
