//! Domain rules shared by the Notecrypt service and client.
//!
//! Nothing in here touches the database or the network: constants,
//! validation functions, and the recycle-bin lifecycle math.

pub mod accounts;
pub mod error;
pub mod notes;
pub mod types;
