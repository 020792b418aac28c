//! Request authentication extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from an access token.
//! - [`auth::RefreshUser`] -- Resolves the caller from a refresh token.

pub mod auth;
