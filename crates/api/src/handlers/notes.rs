//! Handlers for the `/notes` resource.
//!
//! Covers the active list, the recycle bin, and every lifecycle transition:
//! create, edit, soft delete, restore, and permanent purge. All endpoints
//! require a session token and only operate on the caller's own notes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use notecrypt_core::error::CoreError;
use notecrypt_core::notes::{is_expired, validate_new_note, validate_note_body, DeletionStamps};
use notecrypt_core::types::DbId;
use notecrypt_db::models::note::{CreateNote, Note, UpdateNote};
use notecrypt_db::repositories::NoteRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{MessageResponse, NoteResponse};
use crate::state::AppState;

/// Request body for `POST /notes`.
#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Request body for `PUT /notes/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// GET /api/notes/{username}
///
/// Active notes, most recently updated first.
pub async fn list_active(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<Note>>> {
    auth.ensure_owns(&username)?;
    let notes = NoteRepo::list_active(&state.pool, &username).await?;
    Ok(Json(notes))
}

/// GET /api/notes/{username}/recycle
///
/// Recycle bin, most recently deleted first. Notes already past their expiry
/// but not yet swept are left out.
pub async fn list_deleted(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> AppResult<Json<Vec<Note>>> {
    auth.ensure_owns(&username)?;
    let now = Utc::now();
    let notes = NoteRepo::list_deleted(&state.pool, &username)
        .await?
        .into_iter()
        .filter(|n| !is_expired(n.expires_at, now))
        .collect();
    Ok(Json(notes))
}

/// POST /api/notes
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<NoteResponse<Note>>)> {
    validate_new_note(&input.username, &input.title, &input.content)
        .map_err(CoreError::Validation)?;
    let username = input.username.trim();
    auth.ensure_owns(username)?;

    let note = NoteRepo::create(
        &state.pool,
        &CreateNote {
            username: username.to_string(),
            title: input.title,
            content: input.content,
        },
    )
    .await?;

    tracing::debug!(note_id = note.id, username = %note.username, "Note created");

    Ok((
        StatusCode::CREATED,
        Json(NoteResponse {
            message: "Note created",
            note,
        }),
    ))
}

/// PUT /api/notes/{id}
///
/// Overwrite title and content. Notes in the recycle bin must be restored
/// before they can be edited.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    Json(input): Json<UpdateNoteRequest>,
) -> AppResult<Json<NoteResponse<Note>>> {
    let id = parse_note_id(&key)?;
    let existing = load_owned_note(&state, &auth, id).await?;
    validate_note_body(&input.title, &input.content).map_err(CoreError::Validation)?;

    if existing.is_deleted {
        return Err(AppError::Core(CoreError::Conflict(
            "Note is in the recycle bin; restore it before editing".into(),
        )));
    }

    // The UPDATE re-checks owner and not-deleted; a concurrent soft delete
    // makes it match no row.
    let note = NoteRepo::update(
        &state.pool,
        id,
        &auth.username,
        &UpdateNote {
            title: input.title,
            content: input.content,
        },
    )
    .await?
    .ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Note changed while saving; reload and try again".into(),
        ))
    })?;

    Ok(Json(NoteResponse {
        message: "Note updated",
        note,
    }))
}

/// DELETE /api/notes/{id}
///
/// Move a note to the recycle bin for the retention window.
pub async fn soft_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> AppResult<Json<NoteResponse<Note>>> {
    let id = parse_note_id(&key)?;
    load_owned_note(&state, &auth, id).await?;

    let note = NoteRepo::soft_delete(&state.pool, id, DeletionStamps::at(Utc::now()))
        .await?
        .ok_or_else(|| note_not_found(id))?;

    tracing::debug!(note_id = id, expires_at = ?note.expires_at, "Note moved to recycle bin");

    Ok(Json(NoteResponse {
        message: "Note moved to recycle bin",
        note,
    }))
}

/// PUT /api/notes/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> AppResult<Json<NoteResponse<Note>>> {
    let id = parse_note_id(&key)?;
    load_owned_note(&state, &auth, id).await?;

    let note = NoteRepo::restore(&state.pool, id)
        .await?
        .ok_or_else(|| note_not_found(id))?;

    Ok(Json(NoteResponse {
        message: "Note restored",
        note,
    }))
}

/// DELETE /api/notes/{id}/permanent
///
/// Remove a note for good, whatever its lifecycle state.
pub async fn purge(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_note_id(&key)?;
    load_owned_note(&state, &auth, id).await?;

    if !NoteRepo::hard_delete(&state.pool, id).await? {
        return Err(note_not_found(id));
    }

    tracing::info!(note_id = id, username = %auth.username, "Note permanently deleted");

    Ok(Json(MessageResponse {
        message: "Note permanently deleted",
    }))
}

// ── Private helpers ──────────────────────────────────────────────────────

fn note_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Note", id })
}

/// Note ids share the `{key}` path segment with usernames, so they arrive as
/// text. Anything that is not an id cannot name a note.
fn parse_note_id(key: &str) -> AppResult<DbId> {
    key.parse()
        .map_err(|_| AppError::NotFound("Note not found".into()))
}

/// Fetch a note by id and check that the caller owns it.
///
/// A recycle-bin note past its expiry counts as gone even before the sweep
/// removes the row.
async fn load_owned_note(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Note> {
    let note = NoteRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|n| !(n.is_deleted && is_expired(n.expires_at, Utc::now())))
        .ok_or_else(|| note_not_found(id))?;
    auth.ensure_owns(&note.username)?;
    Ok(note)
}
