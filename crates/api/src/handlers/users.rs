//! Handlers for the `/users` resource (register, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use notecrypt_core::accounts::{validate_credentials, AuthError};
use notecrypt_core::error::CoreError;
use notecrypt_db::models::user::{CreateUser, UserResponse};
use notecrypt_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{authenticate, hash_password};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/register` and `POST /users/login`.
///
/// Missing fields deserialize as empty strings so they are reported as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub account: UserResponse,
    /// Bearer token required by every note endpoint.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users/register
///
/// Create an account. The username is stored trimmed; only an Argon2id hash
/// of the password is kept.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let username =
        validate_credentials(&input.username, &input.password).map_err(CoreError::Validation)?;

    if UserRepo::username_exists(&state.pool, username).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A concurrent registration can still win the race; the unique
    // constraint then surfaces as a CONFLICT via `classify_sqlx_error`.
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Account created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created successfully",
        }),
    ))
}

/// POST /api/users/login
///
/// Authenticate with username + password. Returns the public account fields
/// and a signed session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<LoginResponse>> {
    let username =
        validate_credentials(&input.username, &input.password).map_err(CoreError::Validation)?;

    let account = UserRepo::find_by_username(&state.pool, username).await?;

    let user = authenticate(account.as_ref(), &input.password).map_err(|err| {
        match &err {
            AuthError::UnknownUser => tracing::info!(%username, "Login rejected: unknown user"),
            AuthError::WrongPassword => tracing::info!(%username, "Login rejected: wrong password"),
            AuthError::Hash(_) => {}
        }
        CoreError::from(err)
    })?;

    let token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::debug!(user_id = user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful",
        account: UserResponse::from(user),
        token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}
