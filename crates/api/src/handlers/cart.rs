//! Handlers for the `/cart` resource.
//!
//! Stock checks here read the current level and reserve nothing; placing the
//! order re-validates under row locks.

use axum::extract::State;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use storefront_core::cart::{cart_total, ensure_in_stock, line_total, merged_quantity};
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::cart::{CartItem, CartLineView};
use storefront_db::models::product::Product;
use storefront_db::repositories::{CartRepo, ProductRepo};
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{PathParam, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /cart` and `PUT /cart`.
#[derive(Debug, Deserialize, Validate)]
pub struct CartItemRequest {
    pub product_id: DbId,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
}

/// One rendered cart line.
#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product_id: DbId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
    pub available: i32,
}

impl From<CartLineView> for CartLineResponse {
    fn from(line: CartLineView) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name,
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: line_total(line.unit_price, line.quantity),
            available: line.available,
        }
    }
}

/// The caller's cart with a total at current prices.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total: Decimal,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/cart
pub async fn view_cart(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<ApiResponse<CartResponse>> {
    let lines = CartRepo::list_for_user(&state.pool, user.user_id).await?;
    let total = cart_total(lines.iter().map(|l| (l.unit_price, l.quantity)));
    let items = lines.into_iter().map(CartLineResponse::from).collect();

    Ok(ApiResponse::ok(
        "Cart fetched successfully",
        CartResponse { items, total },
    ))
}

/// POST /api/v1/cart
///
/// Add units of a product. Adding a product that is already in the cart
/// increases that line's quantity; the combined quantity must not exceed stock.
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CartItemRequest>,
) -> AppResult<ApiResponse<CartItem>> {
    let product = find_product(&state, input.product_id).await?;

    let existing = CartRepo::find_line(&state.pool, user.user_id, product.id).await?;
    let combined = merged_quantity(existing.map(|line| line.quantity), input.quantity)?;
    ensure_in_stock(product.id, combined, product.quantity)?;

    let line = CartRepo::add(&state.pool, user.user_id, product.id, input.quantity).await?;

    tracing::debug!(
        user_id = user.user_id,
        product_id = product.id,
        quantity = line.quantity,
        "Added to cart"
    );

    Ok(ApiResponse::ok("Product added to cart", line))
}

/// PUT /api/v1/cart
///
/// Replace the quantity of a line already in the cart.
pub async fn edit_cart(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CartItemRequest>,
) -> AppResult<ApiResponse<CartItem>> {
    CartRepo::find_line(&state.pool, user.user_id, input.product_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Cart item", input.product_id))?;

    let product = find_product(&state, input.product_id).await?;
    ensure_in_stock(product.id, input.quantity, product.quantity)?;

    let line = CartRepo::set_quantity(&state.pool, user.user_id, product.id, input.quantity)
        .await?
        .ok_or_else(|| CoreError::not_found("Cart item", product.id))?;

    Ok(ApiResponse::ok("Cart updated", line))
}

/// DELETE /api/v1/cart/{product_id}
pub async fn remove_from_cart(
    State(state): State<AppState>,
    user: AuthUser,
    PathParam(product_id): PathParam<DbId>,
) -> AppResult<ApiResponse<()>> {
    let removed = CartRepo::remove(&state.pool, user.user_id, product_id).await?;
    if !removed {
        return Err(CoreError::not_found("Cart item", product_id).into());
    }
    Ok(ApiResponse::message("Product removed from cart"))
}

async fn find_product(state: &AppState, product_id: DbId) -> AppResult<Product> {
    let product = ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Product", product_id))?;
    Ok(product)
}
