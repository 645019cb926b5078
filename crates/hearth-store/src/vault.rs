//! Durable storage boundary: one opaque text blob per user.
//!
//! The cache never touches a vault directly. Only the session layer
//! reads and writes blobs, always outside any store guard, so a slow
//! vault can never stall cache operations.

use async_trait::async_trait;
use dashmap::DashMap;
use hearth_core::{Error, Result, UserId};
use std::path::PathBuf;

/// Per-user blob storage.
///
/// Implementations must tolerate concurrent calls for different users;
/// calls for a single user are serialized by the session layer's flush
/// gates.
#[async_trait]
pub trait HomeVault: Send + Sync {
    /// Fetch the stored blob. `None` means the user was never written.
    async fn read(&self, user: UserId) -> Result<Option<String>>;

    /// Store the user's blob, replacing any previous one.
    async fn write(&self, user: UserId, blob: &str) -> Result<()>;
}

/// Filesystem vault keeping one `<user-uuid>.json` file per user under
/// a root directory. The directory is created on first write.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, user: UserId) -> PathBuf {
        self.root.join(format!("{}.json", user))
    }
}

#[async_trait]
impl HomeVault for FsVault {
    async fn read(&self, user: UserId) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.blob_path(user)).await {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, user: UserId, blob: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.blob_path(user), blob).await?;
        Ok(())
    }
}

/// In-memory vault for tests and for hosts that persist elsewhere.
///
/// An optional size cap models storage media that refuse oversized
/// blobs, which is the easiest way to exercise the write-failure path.
#[derive(Default)]
pub struct MemoryVault {
    blobs: DashMap<UserId, String>,
    max_blob_bytes: Option<usize>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any write larger than `bytes`.
    pub fn with_max_blob_bytes(bytes: usize) -> Self {
        Self {
            blobs: DashMap::new(),
            max_blob_bytes: Some(bytes),
        }
    }

    pub fn contains(&self, user: UserId) -> bool {
        self.blobs.contains_key(&user)
    }

    pub fn blob(&self, user: UserId) -> Option<String> {
        self.blobs.get(&user).map(|blob| blob.clone())
    }
}

#[async_trait]
impl HomeVault for MemoryVault {
    async fn read(&self, user: UserId) -> Result<Option<String>> {
        Ok(self.blob(user))
    }

    async fn write(&self, user: UserId, blob: &str) -> Result<()> {
        if let Some(max) = self.max_blob_bytes {
            if blob.len() > max {
                return Err(Error::vault_rejected(
                    user,
                    format!("blob is {} bytes, cap is {}", blob.len(), max),
                ));
            }
        }
        self.blobs.insert(user, blob.to_string());
        Ok(())
    }
}
