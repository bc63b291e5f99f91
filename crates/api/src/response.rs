//! Shared response envelope types for API handlers.
//!
//! Mutating endpoints answer with a human-readable `message`, optionally
//! alongside the affected record. Use these instead of ad-hoc
//! `serde_json::json!` bodies to keep the shape consistent.

use serde::Serialize;

/// `{ "message": ... }` body for operations with nothing else to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "message": ..., "note": T }` body for note mutations.
#[derive(Debug, Serialize)]
pub struct NoteResponse<T: Serialize> {
    pub message: &'static str,
    pub note: T,
}
