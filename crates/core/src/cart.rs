//! Cart quantity rules shared by the cart handlers and the cart repository.
//!
//! Stock checks here are advisory: they read the level at request time and
//! reserve nothing. The binding check happens inside order fulfillment.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::types::DbId;

/// Smallest quantity a cart line may hold.
pub const MIN_LINE_QUANTITY: i32 = 1;

/// Reject quantities below [`MIN_LINE_QUANTITY`].
pub fn validate_quantity(quantity: i32) -> Result<(), CoreError> {
    if quantity < MIN_LINE_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Quantity must be at least {MIN_LINE_QUANTITY}"
        )));
    }
    Ok(())
}

/// Quantity a line ends up with when `added` more units are put in the cart.
///
/// Adding a product that is already present accumulates onto the existing
/// line rather than replacing it.
pub fn merged_quantity(existing: Option<i32>, added: i32) -> Result<i32, CoreError> {
    validate_quantity(added)?;
    existing
        .unwrap_or(0)
        .checked_add(added)
        .ok_or_else(|| CoreError::Validation("Quantity is too large".into()))
}

/// Fail with [`CoreError::InsufficientStock`] when `requested` exceeds `available`.
pub fn ensure_in_stock(product_id: DbId, requested: i32, available: i32) -> Result<(), CoreError> {
    if requested > available {
        return Err(CoreError::InsufficientStock {
            product_id,
            requested,
            available,
        });
    }
    Ok(())
}

/// Price of `quantity` units at `unit_price`.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of `(unit_price, quantity)` pairs.
pub fn cart_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(price, qty)| line_total(price, qty))
        .sum()
}
