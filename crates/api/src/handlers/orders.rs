//! Handlers for the `/orders` resource.

use axum::extract::State;
use serde::Serialize;
use storefront_db::models::order::OrderWithItems;
use storefront_db::repositories::OrderRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Order history payload.
#[derive(Debug, Serialize)]
pub struct OrderHistory {
    pub orders: Vec<OrderWithItems>,
}

/// POST /api/v1/orders
///
/// Turn the caller's cart into an order. Either the whole order is placed
/// (stock decremented, cart cleared) or nothing changes and the rejection
/// reason is returned.
pub async fn place_order(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let placed = OrderRepo::place(&state.pool, user.user_id)
        .await
        .inspect_err(|e| tracing::info!(user_id = user.user_id, error = %e, "Order rejected"))?;

    Ok(ApiResponse::ok("Order placed successfully", placed))
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<OrderHistory>> {
    let orders = OrderRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(ApiResponse::ok("Orders fetched", OrderHistory { orders }))
}
