//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and credential checks.
//! - [`jwt`] -- session token generation and validation.

pub mod jwt;
pub mod password;
