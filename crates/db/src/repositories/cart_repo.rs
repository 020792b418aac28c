//! Repository for the `cart_items` table.
//!
//! Every query is scoped by `user_id`; one user can never see or touch
//! another user's cart.

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::cart::{CartItem, CartLineView};

const COLUMNS: &str = "id, user_id, product_id, quantity, created_at, updated_at";

pub struct CartRepo;

impl CartRepo {
    /// All lines in a user's cart joined with their products, oldest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CartLineView>, sqlx::Error> {
        sqlx::query_as::<_, CartLineView>(
            "SELECT c.id AS cart_item_id, c.product_id, p.name AS product_name,
                    p.price AS unit_price, c.quantity, p.quantity AS available
             FROM cart_items c
             JOIN products p ON p.id = c.product_id
             WHERE c.user_id = $1
             ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Find the user's line for a product, if any.
    pub async fn find_line(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM cart_items WHERE user_id = $1 AND product_id = $2");
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// Add `quantity` units of a product to the cart.
    ///
    /// Inserts a new line, or adds onto the existing line for the same
    /// product. The increment happens in SQL so concurrent adds never lose
    /// an update.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<CartItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO cart_items (user_id, product_id, quantity)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_cart_items_user_product
             DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_one(pool)
            .await
    }

    /// Replace the quantity of an existing line.
    ///
    /// Returns `None` if the user has no line for the product.
    pub async fn set_quantity(
        pool: &PgPool,
        user_id: DbId,
        product_id: DbId,
        quantity: i32,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        let query = format!(
            "UPDATE cart_items SET quantity = $3, updated_at = NOW()
             WHERE user_id = $1 AND product_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CartItem>(&query)
            .bind(user_id)
            .bind(product_id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    /// Remove the user's line for a product. Returns `true` if a row was deleted.
    pub async fn remove(pool: &PgPool, user_id: DbId, product_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
