//! Repository for `orders` / `order_items`, including order placement.
//!
//! [`OrderRepo::place`] is the fulfillment transaction. It locks the user's
//! cart rows and every product they reference (`FOR UPDATE`, products in id
//! order), validates and prices the cart against those locked rows, writes
//! the order, decrements stock, deletes the snapshotted cart lines, and
//! commits. Concurrent
//! placements touching the same product serialize on the product row lock.
//!
//! Any early return drops the transaction, which rolls it back. The same
//! happens when the request future is dropped on timeout.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use storefront_core::error::CoreError;
use storefront_core::order::{plan_order, CartLine, StockLevel, ORDER_STATUS_PLACED};
use storefront_core::types::DbId;

use crate::models::order::{Order, OrderItem, OrderWithItems};

const ORDER_COLUMNS: &str = "id, user_id, total, status, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price, created_at";

/// Why an order could not be placed.
#[derive(Debug, thiserror::Error)]
pub enum FulfillmentError {
    /// The cart failed validation (empty, unknown product, short on stock).
    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[derive(FromRow)]
struct CartLineRow {
    id: DbId,
    product_id: DbId,
    quantity: i32,
}

#[derive(FromRow)]
struct StockRow {
    id: DbId,
    price: Decimal,
    quantity: i32,
}

pub struct OrderRepo;

impl OrderRepo {
    /// Convert the user's cart into a `PLACED` order as one transaction.
    ///
    /// On any error nothing is written: no order row, cart unchanged,
    /// stock unchanged.
    pub async fn place(pool: &PgPool, user_id: DbId) -> Result<OrderWithItems, FulfillmentError> {
        let mut tx = pool.begin().await?;

        let cart: Vec<CartLineRow> = sqlx::query_as(
            "SELECT id, product_id, quantity FROM cart_items
             WHERE user_id = $1
             ORDER BY id
             FOR UPDATE",
        )
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let mut product_ids: Vec<DbId> = cart.iter().map(|line| line.product_id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let stock: Vec<StockRow> = sqlx::query_as(
            "SELECT id, price, quantity FROM products
             WHERE id = ANY($1)
             ORDER BY id
             FOR UPDATE",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await?;

        let lines: Vec<CartLine> = cart
            .iter()
            .map(|row| CartLine {
                product_id: row.product_id,
                quantity: row.quantity,
            })
            .collect();
        let levels: Vec<StockLevel> = stock
            .iter()
            .map(|row| StockLevel {
                product_id: row.id,
                price: row.price,
                available: row.quantity,
            })
            .collect();

        let plan = plan_order(&lines, &levels)?;

        let order_query = format!(
            "INSERT INTO orders (user_id, total, status)
             VALUES ($1, $2, $3)
             RETURNING {ORDER_COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&order_query)
            .bind(user_id)
            .bind(plan.total)
            .bind(ORDER_STATUS_PLACED)
            .fetch_one(&mut *tx)
            .await?;

        let item_query = format!(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(plan.items.len());
        for planned in &plan.items {
            let item = sqlx::query_as::<_, OrderItem>(&item_query)
                .bind(order.id)
                .bind(planned.product_id)
                .bind(planned.quantity)
                .bind(planned.unit_price)
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);
        }

        let mut deductions: Vec<(DbId, i32)> = plan.stock_deductions().into_iter().collect();
        deductions.sort_unstable();
        for (product_id, quantity) in deductions {
            // Rows are locked above; the condition still keeps stock >= 0.
            let result = sqlx::query(
                "UPDATE products SET quantity = quantity - $2, updated_at = NOW()
                 WHERE id = $1 AND quantity >= $2",
            )
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let available = levels
                    .iter()
                    .find(|level| level.product_id == product_id)
                    .map_or(0, |level| level.available);
                return Err(CoreError::InsufficientStock {
                    product_id,
                    requested: quantity,
                    available,
                }
                .into());
            }
        }

        // Only the lines that were priced. A line added by a concurrent
        // request after the snapshot stays in the cart.
        let ordered_lines: Vec<DbId> = cart.iter().map(|row| row.id).collect();
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(&ordered_lines)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            order_id = order.id,
            user_id,
            item_count = items.len(),
            total = %order.total,
            "Order placed"
        );

        Ok(OrderWithItems { order, items })
    }

    /// All orders for a user, newest first, each with its items.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<OrderWithItems>, sqlx::Error> {
        let order_query = format!(
            "SELECT {ORDER_COLUMNS} FROM orders
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&order_query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<DbId> = orders.iter().map(|o| o.id).collect();
        let item_query = format!(
            "SELECT {ITEM_COLUMNS} FROM order_items
             WHERE order_id = ANY($1)
             ORDER BY id"
        );
        let items = sqlx::query_as::<_, OrderItem>(&item_query)
            .bind(&order_ids)
            .fetch_all(pool)
            .await?;

        let mut by_order: HashMap<DbId, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }
}
