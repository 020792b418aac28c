//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Issuing and validating signed access/refresh tokens.

pub mod jwt;
pub mod password;
