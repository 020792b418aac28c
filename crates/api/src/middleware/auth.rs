//! JWT-based authentication extractors for Axum handlers.
//!
//! Every protected handler takes [`AuthUser`] as a parameter. Extraction
//! validates the bearer token and then resolves its subject to a live user
//! row; it never writes anything.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use storefront_core::error::{AuthRejection, CoreError};
use storefront_core::types::DbId;
use storefront_db::models::user::User;
use storefront_db::repositories::UserRepo;
use storefront_db::DbPool;

use crate::auth::jwt::{validate_token, JwtConfig, TokenKind};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from an access token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<ApiResponse<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(ApiResponse::message("ok"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
}

/// Same as [`AuthUser`], but the presented token must be a refresh token.
/// Only the token refresh endpoint accepts it.
#[derive(Debug, Clone)]
pub struct RefreshUser {
    pub user: User,
}

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AuthRejection> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingToken)?
        .to_str()
        .map_err(|_| AuthRejection::MalformedToken)?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthRejection::MalformedToken)
}

/// Validate `token` as a `kind` token and resolve its subject to a user.
pub async fn authenticate(
    pool: &DbPool,
    config: &JwtConfig,
    token: &str,
    kind: TokenKind,
) -> Result<User, AppError> {
    let claims = validate_token(token, kind, config).map_err(CoreError::from)?;

    UserRepo::find_by_email(pool, &claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(AuthRejection::UnknownSubject.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).map_err(CoreError::from)?;
        let user = authenticate(&state.pool, &state.config.jwt, token, TokenKind::Access).await?;

        Ok(AuthUser {
            user_id: user.id,
            email: user.email,
        })
    }
}

impl FromRequestParts<AppState> for RefreshUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).map_err(CoreError::from)?;
        let user = authenticate(&state.pool, &state.config.jwt, token, TokenKind::Refresh).await?;
        Ok(RefreshUser { user })
    }
}
