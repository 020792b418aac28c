use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthRejection),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: DbId,
        requested: i32,
        available: i32,
    },
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`] keyed by anything printable
    /// (numeric id, email address, ...).
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Why a presented credential was refused.
///
/// Every variant becomes a 401, but each keeps its own error code so clients
/// and logs can tell an expired session apart from a forged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Token is not valid for this operation")]
    WrongTokenKind,

    #[error("Token subject no longer exists")]
    UnknownSubject,
}

impl AuthRejection {
    /// Stable machine-readable code included in error response bodies.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::BadSignature => "BAD_SIGNATURE",
            Self::Expired => "TOKEN_EXPIRED",
            Self::WrongTokenKind => "WRONG_TOKEN_KIND",
            Self::UnknownSubject => "UNKNOWN_SUBJECT",
        }
    }
}
