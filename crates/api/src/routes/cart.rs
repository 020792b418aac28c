//! Route definitions for the `/cart` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::cart;
use crate::state::AppState;

/// Routes mounted at `/cart`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(cart::view_cart)
                .post(cart::add_to_cart)
                .put(cart::edit_cart),
        )
        .route("/{product_id}", delete(cart::remove_from_cart))
}
