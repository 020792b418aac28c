//! Domain types and pure logic for the storefront backend.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates call into it for validation, pricing, and error classification.

pub mod cart;
pub mod error;
pub mod order;
pub mod types;
