//! Hearth Store - home cache, blob codec, and session persistence

pub mod codec;
pub mod resolver;
pub mod sessions;
pub mod store;
pub mod vault;

pub use resolver::{DefaultResolver, DEFAULT_HOME_NAME};
pub use sessions::{SessionSync, SyncConfig};
pub use store::HomeStore;
pub use vault::{FsVault, HomeVault, MemoryVault};
