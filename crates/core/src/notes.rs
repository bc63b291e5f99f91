//! Note validation and recycle-bin lifecycle rules.
//!
//! A note is either active or deleted. Deleting stamps `deleted_at` and
//! `expires_at` together; restoring clears both. Once `expires_at` passes,
//! the expiry sweep removes the row for good.

use chrono::{Duration, SubsecRound};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Days a soft-deleted note stays in the recycle bin before it is purged.
pub const RETENTION_DAYS: i64 = 30;

/// The recycle-bin retention window (exactly 30 × 24 × 60 × 60 seconds).
pub fn retention_window() -> Duration {
    Duration::days(RETENTION_DAYS)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// The `(deleted_at, expires_at)` pair stamped on a soft delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionStamps {
    pub deleted_at: Timestamp,
    pub expires_at: Timestamp,
}

impl DeletionStamps {
    /// Stamps for a note deleted at `now`, truncated to the microsecond
    /// precision PostgreSQL stores.
    pub fn at(now: Timestamp) -> Self {
        let now = now.trunc_subsecs(6);
        Self {
            deleted_at: now,
            expires_at: now + retention_window(),
        }
    }
}

/// Check that the deletion stamps agree with the lifecycle flag: both set
/// when deleted, both absent when active.
pub fn deletion_stamps_consistent(
    is_deleted: bool,
    deleted_at: Option<Timestamp>,
    expires_at: Option<Timestamp>,
) -> bool {
    match (is_deleted, deleted_at, expires_at) {
        (true, Some(_), Some(_)) | (false, None, None) => true,
        _ => false,
    }
}

/// Whether a note with the given expiry is due for purging at `now`.
pub fn is_expired(expires_at: Option<Timestamp>, now: Timestamp) -> bool {
    expires_at.is_some_and(|at| at <= now)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the fields of a note being created.
pub fn validate_new_note(username: &str, title: &str, content: &str) -> Result<(), String> {
    if username.trim().is_empty() || title.trim().is_empty() || content.trim().is_empty() {
        return Err("All fields are required".to_string());
    }
    Ok(())
}

/// Validate the title/content pair of an edit.
pub fn validate_note_body(title: &str, content: &str) -> Result<(), String> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err("Title and content are required".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn expiry_is_exactly_thirty_days_after_deletion() {
        let now = Utc.with_ymd_and_hms(2024, 2, 20, 8, 30, 0).unwrap();
        let stamps = DeletionStamps::at(now);
        assert_eq!(stamps.deleted_at, now);
        assert_eq!(
            (stamps.expires_at - stamps.deleted_at).num_seconds(),
            30 * 24 * 60 * 60
        );
    }

    #[test]
    fn stamps_must_match_flag() {
        let now = Utc::now();
        assert!(deletion_stamps_consistent(false, None, None));
        assert!(deletion_stamps_consistent(true, Some(now), Some(now)));
        assert!(!deletion_stamps_consistent(true, None, None));
        assert!(!deletion_stamps_consistent(false, Some(now), None));
        assert!(!deletion_stamps_consistent(true, Some(now), None));
    }

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        assert!(!is_expired(None, now));
        assert!(is_expired(Some(now), now));
        assert!(is_expired(Some(now - Duration::seconds(1)), now));
        assert!(!is_expired(Some(now + Duration::seconds(1)), now));
    }

    #[test]
    fn new_note_requires_every_field() {
        assert!(validate_new_note("alice", "T", "C").is_ok());
        assert!(validate_new_note("", "T", "C").is_err());
        assert!(validate_new_note("alice", "", "C").is_err());
        assert!(validate_new_note("alice", "T", "  ").is_err());
    }

    #[test]
    fn edit_requires_title_and_content() {
        assert!(validate_note_body("T", "C").is_ok());
        assert_eq!(
            validate_note_body(" ", "C").unwrap_err(),
            "Title and content are required"
        );
    }
}
