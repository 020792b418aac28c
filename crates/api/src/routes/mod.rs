pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /users                 register               (public)
/// POST   /login                 login                  (public)
/// POST   /refresh               refresh token pair     (refresh token)
///
/// GET    /products              list products          (access token)
/// GET    /products/{id}         get product            (access token)
///
/// GET    /cart                  view cart              (access token)
/// POST   /cart                  add to cart            (access token)
/// PUT    /cart                  set line quantity      (access token)
/// DELETE /cart/{product_id}     remove line            (access token)
///
/// GET    /orders                order history          (access token)
/// POST   /orders                place order from cart  (access token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/products", products::router())
        .nest("/cart", cart::router())
        .nest("/orders", orders::router())
}
