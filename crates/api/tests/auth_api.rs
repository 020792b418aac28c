//! HTTP-level integration tests for registration, login, refresh, and the
//! access guard on protected routes.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_user, get, get_auth, post_json, post_auth,
    signed_in_user, test_jwt_config, TEST_PASSWORD,
};
use sqlx::PgPool;
use storefront_api::auth::jwt::{generate_token, JwtConfig, TokenKind};

async fn login_json(pool: &PgPool, email: &str, password: &str) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/login", body).await;
    let status = response.status();
    (status, body_json(response).await)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let body = serde_json::json!({ "email": "new@test.com", "password": "long-enough-pw" });
    let response = post_json(build_test_app(pool.clone()), "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created");
    assert_eq!(json["data"]["email"], "new@test.com");
    assert!(json["data"].get("password_hash").is_none(), "hash must never be returned");

    let stored: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE email = $1")
        .bind("new@test.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(stored.starts_with("$argon2id$"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_invalid_body_is_400(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let bad_email = serde_json::json!({ "email": "not-an-email", "password": "long-enough-pw" });
    assert_eq!(
        post_json(app, "/api/v1/users", bad_email).await.status(),
        StatusCode::BAD_REQUEST
    );

    let app = build_test_app(pool.clone());
    let short_pw = serde_json::json!({ "email": "a@test.com", "password": "short" });
    assert_eq!(
        post_json(app, "/api/v1/users", short_pw).await.status(),
        StatusCode::BAD_REQUEST
    );

    let app = build_test_app(pool);
    let missing = serde_json::json!({ "email": "a@test.com" });
    assert_eq!(
        post_json(app, "/api/v1/users", missing).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_is_409(pool: PgPool) {
    create_user(&pool, "taken@test.com").await;

    let body = serde_json::json!({ "email": "taken@test.com", "password": "long-enough-pw" });
    let response = post_json(build_test_app(pool), "/api/v1/users", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["message"], "Email already registered");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success_returns_tokens_in_body_and_headers(pool: PgPool) {
    let user = create_user(&pool, "login@test.com").await;

    let body = serde_json::json!({ "email": "login@test.com", "password": TEST_PASSWORD });
    let response = post_json(build_test_app(pool), "/api/v1/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let header_access = response.headers()["access_token"].to_str().unwrap().to_string();
    let header_refresh = response.headers()["refresh_token"].to_str().unwrap().to_string();

    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["id"], user.id);
    assert_eq!(json["data"]["user"]["email"], "login@test.com");
    assert_eq!(json["data"]["access_token"], header_access);
    assert_eq!(json["data"]["refresh_token"], header_refresh);
    assert_ne!(header_access, header_refresh);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_empty_fields_is_400(pool: PgPool) {
    let (status, _) = login_json(&pool, "", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_is_400(pool: PgPool) {
    create_user(&pool, "wrongpw@test.com").await;

    let (status, json) = login_json(&pool, "wrongpw@test.com", "incorrect_password").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_unknown_email_is_404(pool: PgPool) {
    let (status, json) = login_json(&pool, "ghost@test.com", "whatever").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Access guard
// ---------------------------------------------------------------------------

async fn products_status_with(pool: &PgPool, token: &str) -> (StatusCode, serde_json::Value) {
    let response = get_auth(build_test_app(pool.clone()), "/api/v1/products", token).await;
    let status = response.status();
    (status, body_json(response).await)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_valid_access_token_is_accepted(pool: PgPool) {
    let (_user, token) = signed_in_user(&pool, "guard@test.com").await;

    let (status, json) = products_status_with(&pool, &token).await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/products").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_TOKEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_malformed(pool: PgPool) {
    let (status, json) = products_status_with(&pool, "garbage").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "MALFORMED_TOKEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_signature_is_rejected(pool: PgPool) {
    create_user(&pool, "forged@test.com").await;
    let other = JwtConfig {
        secret: "some-other-secret".to_string(),
        ..test_jwt_config()
    };
    let now = chrono::Utc::now().timestamp();
    let token = generate_token("forged@test.com", TokenKind::Access, &other, now).unwrap();

    let (status, json) = products_status_with(&pool, &token).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "BAD_SIGNATURE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_token_reports_expiry(pool: PgPool) {
    create_user(&pool, "stale@test.com").await;
    let config = test_jwt_config();
    let two_hours_ago = chrono::Utc::now().timestamp() - 2 * 3600;
    let token = generate_token("stale@test.com", TokenKind::Access, &config, two_hours_ago).unwrap();

    let (status, json) = products_status_with(&pool, &token).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "TOKEN_EXPIRED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_token_cannot_access_resources(pool: PgPool) {
    create_user(&pool, "kind@test.com").await;
    let (_, login) = login_json(&pool, "kind@test.com", TEST_PASSWORD).await;
    let refresh = login["data"]["refresh_token"].as_str().unwrap();

    let (status, json) = products_status_with(&pool, refresh).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "WRONG_TOKEN_KIND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_user_token_is_unknown_subject(pool: PgPool) {
    let (user, token) = signed_in_user(&pool, "gone@test.com").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, json) = products_status_with(&pool, &token).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNKNOWN_SUBJECT");
}

// ---------------------------------------------------------------------------
// Refresh
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_issues_a_working_pair(pool: PgPool) {
    create_user(&pool, "refresher@test.com").await;
    let (_, login) = login_json(&pool, "refresher@test.com", TEST_PASSWORD).await;
    let refresh = login["data"]["refresh_token"].as_str().unwrap();

    let response = post_auth(build_test_app(pool.clone()), "/api/v1/refresh", refresh).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let new_access = json["data"]["access_token"].as_str().unwrap();

    let (status, _) = products_status_with(&pool, new_access).await;
    assert_eq!(status, StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rejects_access_tokens(pool: PgPool) {
    let (_user, access) = signed_in_user(&pool, "noswap@test.com").await;

    let response = post_auth(build_test_app(pool), "/api/v1/refresh", &access).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "WRONG_TOKEN_KIND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_is_public(pool: PgPool) {
    let response = get(build_test_app(pool), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
