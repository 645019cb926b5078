//! Error types for hearth

use crate::types::UserId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed home blob: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not encode homes: {0}")]
    Encode(String),

    #[error("vault error: {0}")]
    Vault(String),

    #[error("vault rejected write for {user}: {reason}")]
    VaultRejected { user: UserId, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }

    pub fn vault(message: impl Into<String>) -> Self {
        Self::Vault(message.into())
    }

    pub fn vault_rejected(user: UserId, reason: impl Into<String>) -> Self {
        Self::VaultRejected {
            user,
            reason: reason.into(),
        }
    }
}
