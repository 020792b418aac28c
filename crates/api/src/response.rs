//! Shared response envelope.
//!
//! Every body the API produces has the same shape:
//!
//! ```text
//! { "message": "...", "status": 200, "data": ... }                 success
//! { "message": "...", "status": 400, "code": "...", "error": ... } failure
//! ```
//!
//! Handlers return [`ApiResponse<T>`] for success and
//! [`AppError`](crate::error::AppError) for failure, so the payload type of
//! each endpoint is visible in its signature.

use std::borrow::Cow;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A successful response carrying an optional typed payload.
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    message: Cow<'static, str>,
    data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 with a payload.
    pub fn ok(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 200 with only a message.
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Serialize)]
struct SuccessBody<'a, T> {
    message: &'a str,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = SuccessBody {
            message: &self.message,
            status: self.status.as_u16(),
            data: self.data.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Failure body written by `AppError`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
    pub code: &'static str,
    /// Secondary diagnostic detail. Never raw storage error text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}
