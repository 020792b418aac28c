//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod users;
