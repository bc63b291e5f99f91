use crate::api::ApiError;
use crate::session::SessionError;

/// Failures surfaced by [`crate::app::NotesApp`] operations.
///
/// The `Display` text is what ends up in the banner.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service no longer accepts the stored session token.
    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    /// At least one deletion in a bulk purge failed.
    #[error("Error emptying recycle bin")]
    PartialPurge { failed: usize },

    #[error(transparent)]
    Session(#[from] SessionError),
}
