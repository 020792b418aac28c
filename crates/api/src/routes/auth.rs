//! Route definitions for registration, login, and refresh.

use axum::routing::post;
use axum::Router;

use crate::handlers::{auth, users};
use crate::state::AppState;

/// ```text
/// POST /users    -> create_user
/// POST /login    -> login
/// POST /refresh  -> refresh (requires refresh token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
}
