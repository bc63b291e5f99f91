//! HTTP-level integration tests for account registration and login.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, register};
use notecrypt_db::repositories::UserRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// First registration succeeds with 201 and only a message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_success(pool: PgPool) {
    let body = serde_json::json!({ "username": "alice", "password": "secret" });
    let response = post_json(build_test_app(pool.clone()), "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Account created successfully");
    assert_eq!(json.as_object().unwrap().len(), 1, "nothing but the message is echoed");

    let user = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .expect("account should be stored");
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert_ne!(user.password_hash, "secret");
}

/// Registering the same username twice fails the second time.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    register(build_test_app(pool.clone()), "alice", "secret").await;

    let body = serde_json::json!({ "username": "alice", "password": "other" });
    let response = post_json(build_test_app(pool), "/api/users/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Username already exists");
}

/// Usernames are trimmed before the uniqueness check.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_trims_username(pool: PgPool) {
    register(build_test_app(pool.clone()), "  alice  ", "secret").await;

    let body = serde_json::json!({ "username": "alice", "password": "secret" });
    let response = post_json(build_test_app(pool.clone()), "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(UserRepo::find_by_username(&pool, "alice").await.unwrap().is_some());
}

/// Missing or empty fields are a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_missing_fields(pool: PgPool) {
    for body in [
        serde_json::json!({ "username": "alice" }),
        serde_json::json!({ "password": "secret" }),
        serde_json::json!({ "username": "   ", "password": "secret" }),
        serde_json::json!({ "username": "alice", "password": "" }),
    ] {
        let response = post_json(build_test_app(pool.clone()), "/api/users/register", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    assert!(!UserRepo::username_exists(&pool, "alice").await.unwrap());
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns the public account fields and a token, never the hash.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    register(build_test_app(pool.clone()), "alice", "secret").await;

    let body = serde_json::json!({ "username": " alice ", "password": "secret" });
    let response = post_json(build_test_app(pool), "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful");
    assert_eq!(json["account"]["username"], "alice");
    assert!(json["account"]["id"].is_number());
    assert!(json["account"]["createdAt"].is_string());
    assert!(json["account"].get("passwordHash").is_none());
    assert!(json["account"].get("password_hash").is_none());
    assert!(json["token"].is_string());
    assert_eq!(json["expiresIn"], 60 * 60);
}

/// Wrong password returns 401 with its own message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    register(build_test_app(pool.clone()), "alice", "secret").await;

    let body = serde_json::json!({ "username": "alice", "password": "wrong" });
    let response = post_json(build_test_app(pool), "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Wrong password");
}

/// Unknown username returns 401 with a distinct message.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_unknown_user(pool: PgPool) {
    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(build_test_app(pool), "/api/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User not found");
}

/// Usernames are case-sensitive.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_is_case_sensitive(pool: PgPool) {
    register(build_test_app(pool.clone()), "alice", "secret").await;

    let body = serde_json::json!({ "username": "Alice", "password": "secret" });
    let response = post_json(build_test_app(pool), "/api/users/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Missing credentials are a 400, not a 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_missing_fields(pool: PgPool) {
    let body = serde_json::json!({ "username": "alice" });
    let response = post_json(build_test_app(pool), "/api/users/login", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
