//! Repository for the `notes` table.
//!
//! Soft delete flips `is_deleted` and stamps `deleted_at`/`expires_at` in one
//! statement; restore clears all three. `updated_at` only moves on a text
//! edit.

use notecrypt_core::notes::DeletionStamps;
use notecrypt_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::note::{CreateNote, Note, UpdateNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, title, content, is_deleted, deleted_at, expires_at, \
                        created_at, updated_at";

/// Provides CRUD and recycle-bin operations for notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new active note, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNote) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (username, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(&input.username)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a note by ID regardless of lifecycle state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's active notes, most recently updated first.
    pub async fn list_active(pool: &PgPool, username: &str) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE username = $1 AND is_deleted = FALSE
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(username)
            .fetch_all(pool)
            .await
    }

    /// List a user's recycle bin, most recently deleted first.
    pub async fn list_deleted(pool: &PgPool, username: &str) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE username = $1 AND is_deleted = TRUE
             ORDER BY deleted_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(username)
            .fetch_all(pool)
            .await
    }

    /// Overwrite an active note's title and content and refresh `updated_at`.
    ///
    /// Returns `None` unless a row with the given `id` exists, belongs to
    /// `owner`, and is not in the recycle bin.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner: &str,
        input: &UpdateNote,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = $2,
                content = $3,
                updated_at = NOW()
             WHERE id = $1 AND username = $4 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// Move a note to the recycle bin with the given stamps.
    ///
    /// Deleting an already-deleted note re-stamps it. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        stamps: DeletionStamps,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                is_deleted = TRUE,
                deleted_at = $2,
                expires_at = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(stamps.deleted_at)
            .bind(stamps.expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Bring a note back from the recycle bin, clearing both stamps.
    ///
    /// Restoring an active note is a no-op that still returns the row. A note
    /// whose expiry has passed stays deleted and yields `None`.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                is_deleted = FALSE,
                deleted_at = NULL,
                expires_at = NULL
             WHERE id = $1 AND (expires_at IS NULL OR expires_at > NOW())
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a note. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every recycle-bin note whose expiry is at or before `now`.
    ///
    /// Returns the number of rows removed.
    pub async fn purge_expired(pool: &PgPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM notes WHERE is_deleted = TRUE AND expires_at <= $1",
        )
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
