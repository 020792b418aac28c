//! Route definitions for the `/orders` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(orders::list_orders).post(orders::place_order))
}
