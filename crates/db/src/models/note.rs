//! Note entity model and DTOs.

use notecrypt_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notes` table.
///
/// Serializes in the camelCase wire shape; the deletion stamps are omitted
/// entirely while the note is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: DbId,
    pub username: String,
    pub title: String,
    pub content: String,
    pub is_deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new note.
#[derive(Debug)]
pub struct CreateNote {
    pub username: String,
    pub title: String,
    pub content: String,
}

/// DTO for editing a note's text. Both fields are overwritten.
#[derive(Debug)]
pub struct UpdateNote {
    pub title: String,
    pub content: String,
}
