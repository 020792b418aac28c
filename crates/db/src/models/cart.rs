//! Cart line model and the joined view used to render a cart.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A row from `cart_items`. Unique per `(user_id, product_id)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartItem {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cart line joined with the product it refers to, at current prices.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CartLineView {
    pub cart_item_id: DbId,
    pub product_id: DbId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Units of the product currently in stock.
    pub available: i32,
}
