//! Fixtures shared by the repository integration tests.

#![allow(dead_code)]

use rust_decimal::Decimal;
use sqlx::PgPool;
use storefront_core::types::DbId;
use storefront_db::models::user::{CreateUser, User};
use storefront_db::repositories::UserRepo;

/// Insert a user with a placeholder hash. These tests never log in.
pub async fn create_user(pool: &PgPool, email: &str) -> User {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Insert a product directly; catalog management has no repository API.
pub async fn create_product(pool: &PgPool, name: &str, price: Decimal, quantity: i32) -> DbId {
    sqlx::query_scalar("INSERT INTO products (name, price, quantity) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(price)
        .bind(quantity)
        .fetch_one(pool)
        .await
        .expect("product insert should succeed")
}

pub async fn set_price(pool: &PgPool, product_id: DbId, price: Decimal) {
    sqlx::query("UPDATE products SET price = $2 WHERE id = $1")
        .bind(product_id)
        .bind(price)
        .execute(pool)
        .await
        .expect("price update should succeed");
}

pub async fn stock_of(pool: &PgPool, product_id: DbId) -> i32 {
    sqlx::query_scalar("SELECT quantity FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("product should exist")
}

pub async fn order_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(pool)
        .await
        .expect("count should succeed")
}

pub async fn order_item_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(pool)
        .await
        .expect("count should succeed")
}
