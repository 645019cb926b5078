//! Hearth Core - shared types, canonical naming, and error handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Home, HomeKey, UserId, WorldId};
