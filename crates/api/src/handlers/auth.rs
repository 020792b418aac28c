//! Handlers for login and token refresh.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_db::models::user::{User, UserResponse};
use storefront_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::jwt::{issue_token_pair, TokenPair};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::RefreshUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Response header carrying the access token.
pub const ACCESS_TOKEN_HEADER: HeaderName = HeaderName::from_static("access_token");
/// Response header carrying the refresh token.
pub const REFRESH_TOKEN_HEADER: HeaderName = HeaderName::from_static("refresh_token");

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful authentication payload returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/login
///
/// Authenticate with email + password. Returns both tokens in the body and
/// in the `access_token` / `refresh_token` response headers.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<(HeaderMap, ApiResponse<LoginResponse>)> {
    if input.email.is_empty() || input.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email and password must not be empty".into(),
        ));
    }

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| CoreError::not_found("User", &input.email))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    tracing::info!(user_id = user.id, "User logged in");
    session_response(&state, user, "Login successful")
}

/// POST /api/v1/refresh
///
/// Exchange a valid refresh token (sent as the bearer token) for a new pair.
pub async fn refresh(
    State(state): State<AppState>,
    RefreshUser { user }: RefreshUser,
) -> AppResult<(HeaderMap, ApiResponse<LoginResponse>)> {
    tracing::debug!(user_id = user.id, "Refreshing session");
    session_response(&state, user, "Token refreshed")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token pair for `user` and build the headers + body.
fn session_response(
    state: &AppState,
    user: User,
    message: &'static str,
) -> AppResult<(HeaderMap, ApiResponse<LoginResponse>)> {
    let TokenPair {
        access_token,
        refresh_token,
    } = issue_token_pair(&user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCESS_TOKEN_HEADER, header_value(&access_token)?);
    headers.insert(REFRESH_TOKEN_HEADER, header_value(&refresh_token)?);

    let body = LoginResponse {
        user: UserResponse::from(user),
        access_token,
        refresh_token,
    };

    Ok((headers, ApiResponse::ok(message, body)))
}

fn header_value(token: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(token)
        .map_err(|e| AppError::InternalError(format!("Token is not a valid header value: {e}")))
}
