//! Handlers for the `/products` resource. Read-only; both require auth.

use axum::extract::State;
use storefront_core::error::CoreError;
use storefront_core::types::DbId;
use storefront_db::models::product::Product;
use storefront_db::repositories::ProductRepo;

use crate::error::AppResult;
use crate::extract::PathParam;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<ApiResponse<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok("Success", products))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    _user: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<ApiResponse<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Product", id))?;
    Ok(ApiResponse::ok("Success", product))
}
