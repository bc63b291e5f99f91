pub mod health;
pub mod notes;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                                   service + database health (public)
///
/// /users/register                           create account (public)
/// /users/login                              authenticate, issue token (public)
///
/// /notes                                    create (POST)
/// /notes/{username}                         active notes (GET)
/// /notes/{username}/recycle                 recycle bin (GET)
/// /notes/{id}                               edit (PUT), soft delete (DELETE)
/// /notes/{id}/restore                       restore (PUT)
/// /notes/{id}/permanent                     purge (DELETE)
/// ```
///
/// Every `/notes` route requires `Authorization: Bearer <token>`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/users", users::router())
        .nest("/notes", notes::router())
}
