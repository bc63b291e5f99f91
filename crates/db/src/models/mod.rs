//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the DTOs used for inserts and edits.

pub mod note;
pub mod user;
