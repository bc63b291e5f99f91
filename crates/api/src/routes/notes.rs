//! Route definitions for the `/notes` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
///
/// The first path segment is a username for the list endpoints and a note
/// id for everything else. The router needs a single parameter name at that
/// position, hence `{key}`.
///
/// ```text
/// POST   /                   -> create
/// GET    /{key}              -> list_active   (key = username)
/// PUT    /{key}              -> update        (key = note id)
/// DELETE /{key}              -> soft_delete   (key = note id)
/// GET    /{key}/recycle      -> list_deleted  (key = username)
/// PUT    /{key}/restore      -> restore       (key = note id)
/// DELETE /{key}/permanent    -> purge         (key = note id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(notes::create))
        .route(
            "/{key}",
            get(notes::list_active)
                .put(notes::update)
                .delete(notes::soft_delete),
        )
        .route("/{key}/recycle", get(notes::list_deleted))
        .route("/{key}/restore", put(notes::restore))
        .route("/{key}/permanent", delete(notes::purge))
}
