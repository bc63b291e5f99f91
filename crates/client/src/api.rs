//! REST client for the notes service.
//!
//! Wraps the account and note endpoints using [`reqwest`]. Every note
//! call carries the session token as a bearer credential.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP client for one notes service deployment.
#[derive(Clone)]
pub struct NotesApi {
    client: reqwest::Client,
    api_url: String,
}

/// A note as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub username: String,
    pub title: String,
    pub content: String,
    pub is_deleted: bool,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public account fields returned on login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub account: Account,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct NoteBody {
    note: Note,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NewNote<'a> {
    username: &'a str,
    title: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct NoteEdit<'a> {
    title: &'a str,
    content: &'a str,
}

/// Errors from the notes REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, or the raw body.
        message: String,
    },
}

impl ApiError {
    /// Whether the service rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Api { status: 401, .. })
    }
}

impl NotesApi {
    /// Create a new client.
    ///
    /// * `api_url` - Base URL including the `/api` prefix, e.g.
    ///   `http://localhost:5000/api`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `POST /users/register`. Returns the server's confirmation message.
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/users/register", self.api_url))
            .json(&Credentials { username, password })
            .send()
            .await?;

        let body: MessageBody = Self::parse_response(response).await?;
        Ok(body.message)
    }

    /// `POST /users/login`.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/users/login", self.api_url))
            .json(&Credentials { username, password })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /notes/{username}`: active notes.
    pub async fn list_active(&self, token: &str, username: &str) -> Result<Vec<Note>, ApiError> {
        let response = self
            .client
            .get(format!("{}/notes/{}", self.api_url, username))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /notes/{username}/recycle`: the recycle bin.
    pub async fn list_deleted(&self, token: &str, username: &str) -> Result<Vec<Note>, ApiError> {
        let response = self
            .client
            .get(format!("{}/notes/{}/recycle", self.api_url, username))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `POST /notes`.
    pub async fn create_note(
        &self,
        token: &str,
        username: &str,
        title: &str,
        content: &str,
    ) -> Result<Note, ApiError> {
        let response = self
            .client
            .post(format!("{}/notes", self.api_url))
            .bearer_auth(token)
            .json(&NewNote {
                username,
                title,
                content,
            })
            .send()
            .await?;

        let body: NoteBody = Self::parse_response(response).await?;
        Ok(body.note)
    }

    /// `PUT /notes/{id}`.
    pub async fn update_note(
        &self,
        token: &str,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Note, ApiError> {
        let response = self
            .client
            .put(format!("{}/notes/{}", self.api_url, id))
            .bearer_auth(token)
            .json(&NoteEdit { title, content })
            .send()
            .await?;

        let body: NoteBody = Self::parse_response(response).await?;
        Ok(body.note)
    }

    /// `DELETE /notes/{id}`: move to the recycle bin.
    pub async fn soft_delete(&self, token: &str, id: i64) -> Result<Note, ApiError> {
        let response = self
            .client
            .delete(format!("{}/notes/{}", self.api_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        let body: NoteBody = Self::parse_response(response).await?;
        Ok(body.note)
    }

    /// `PUT /notes/{id}/restore`.
    pub async fn restore(&self, token: &str, id: i64) -> Result<Note, ApiError> {
        let response = self
            .client
            .put(format!("{}/notes/{}/restore", self.api_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        let body: NoteBody = Self::parse_response(response).await?;
        Ok(body.note)
    }

    /// `DELETE /notes/{id}/permanent`.
    pub async fn purge(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/notes/{}/permanent", self.api_url, id))
            .bearer_auth(token)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the
    /// service's `error` message is extracted so it can be shown verbatim.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
