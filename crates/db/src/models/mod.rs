//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create DTOs or joined read views where the handlers need them

pub mod cart;
pub mod order;
pub mod product;
pub mod user;
