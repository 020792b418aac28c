//! Read access to the `products` table (the stock ledger).

use sqlx::PgPool;
use storefront_core::types::DbId;

use crate::models::product::Product;

const COLUMNS: &str = "id, name, description, price, quantity, created_at, updated_at";

pub struct ProductRepo;

impl ProductRepo {
    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole catalog ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }
}
