//! Client for the notes service: a typed HTTP API wrapper plus the UI state
//! container that drives it.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod session;
pub mod state;

pub use api::NotesApi;
pub use app::NotesApp;
