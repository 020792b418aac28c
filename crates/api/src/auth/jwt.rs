//! Signed session tokens.
//!
//! Both access and refresh tokens are HS256-signed JWTs carrying [`Claims`].
//! They differ only in lifetime and in the `typ` claim, which the validator
//! checks so a long-lived refresh token can never stand in for an access
//! token. Nothing is stored server-side: a token is valid exactly when its
//! signature checks out and `exp` is in the future.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use storefront_core::error::AuthRejection;
use uuid::Uuid;

use crate::config::{env_or, ConfigError};

/// Which of the two session credentials a token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's email address.
    pub sub: String,
    /// Access or refresh.
    pub typ: TokenKind,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;
/// Access tokens live at most a day.
const MAX_ACCESS_EXPIRY_MINS: i64 = 24 * 60;
/// Refresh tokens live at most a year.
const MAX_REFRESH_EXPIRY_DAYS: i64 = 365;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        Self {
            secret,
            access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", DEFAULT_ACCESS_EXPIRY_MINS)?,
            refresh_token_expiry_days: env_or(
                "JWT_REFRESH_EXPIRY_DAYS",
                DEFAULT_REFRESH_EXPIRY_DAYS,
            )?,
        }
        .checked()
    }

    /// Reject lifetimes that are non-positive, out of range, or where the
    /// refresh token would not outlive the access token.
    pub fn checked(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_ACCESS_EXPIRY_MINS).contains(&self.access_token_expiry_mins) {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY_MINS",
                value: self.access_token_expiry_mins.to_string(),
            });
        }
        if !(1..=MAX_REFRESH_EXPIRY_DAYS).contains(&self.refresh_token_expiry_days)
            || self.lifetime_secs(TokenKind::Refresh) <= self.lifetime_secs(TokenKind::Access)
        {
            return Err(ConfigError::Invalid {
                name: "JWT_REFRESH_EXPIRY_DAYS",
                value: self.refresh_token_expiry_days.to_string(),
            });
        }
        Ok(self)
    }

    /// Lifetime in seconds of a token of the given kind.
    pub fn lifetime_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_token_expiry_mins * 60,
            TokenKind::Refresh => self.refresh_token_expiry_days * 24 * 60 * 60,
        }
    }
}

/// An access/refresh token pair handed out at login.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign a token of `kind` for `subject`, issued at `issued_at` (Unix seconds).
pub fn generate_token(
    subject: &str,
    kind: TokenKind,
    config: &JwtConfig,
    issued_at: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: subject.to_string(),
        typ: kind,
        exp: issued_at + config.lifetime_secs(kind),
        iat: issued_at,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Issue a fresh access + refresh pair for `subject`.
pub fn issue_token_pair(
    subject: &str,
    config: &JwtConfig,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    Ok(TokenPair {
        access_token: generate_token(subject, TokenKind::Access, config, now)?,
        refresh_token: generate_token(subject, TokenKind::Refresh, config, now)?,
    })
}

/// Validate a token of the expected kind against the current time.
pub fn validate_token(
    token: &str,
    expected: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, AuthRejection> {
    validate_token_at(token, expected, config, chrono::Utc::now().timestamp())
}

/// Validate a token of the expected kind as of `now` (Unix seconds).
///
/// The signature is checked first, so a genuine token that has merely
/// expired reports [`AuthRejection::Expired`], never a signature failure.
/// Expiry is exact: no leeway.
pub fn validate_token_at(
    token: &str,
    expected: TokenKind,
    config: &JwtConfig,
    now: i64,
) -> Result<Claims, AuthRejection> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthRejection::BadSignature,
        ErrorKind::ExpiredSignature => AuthRejection::Expired,
        _ => AuthRejection::MalformedToken,
    })?
    .claims;

    if claims.typ != expected {
        return Err(AuthRejection::WrongTokenKind);
    }
    if claims.exp <= now {
        return Err(AuthRejection::Expired);
    }
    Ok(claims)
}
