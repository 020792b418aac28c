//! Product entity model.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use storefront_core::types::{DbId, Timestamp};

/// A catalog entry. `quantity` is the units currently available to order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
