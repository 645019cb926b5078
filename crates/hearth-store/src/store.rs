//! In-memory home cache: user -> canonical name -> record.
//!
//! All reads and writes are synchronous map operations guarded by the
//! outer map's shard locks; nothing here performs I/O or holds a guard
//! across an await point. Persistence belongs to the session layer.

use dashmap::DashMap;
use hearth_core::{Home, HomeKey, UserId};
use std::collections::HashMap;

/// Cache of every loaded user's homes.
///
/// Sub-maps appear lazily on the first insert or load for a user and
/// are evicted wholesale by [`HomeStore::drain`] when the user's
/// session ends. An absent sub-map and an empty one answer queries the
/// same way: no homes.
#[derive(Default)]
pub struct HomeStore {
    homes: DashMap<UserId, HashMap<HomeKey, Home>>,
}

impl HomeStore {
    pub fn new() -> Self {
        Self {
            homes: DashMap::new(),
        }
    }

    /// Look up one home by display or canonical name.
    pub fn find(&self, user: UserId, name: &str) -> Option<Home> {
        let homes = self.homes.get(&user)?;
        homes.get(&HomeKey::new(name)).cloned()
    }

    /// Snapshot of a user's homes, in no particular order.
    pub fn list(&self, user: UserId) -> Vec<Home> {
        self.homes
            .get(&user)
            .map(|homes| homes.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Canonical keys of a user's homes, for completion surfaces.
    pub fn keys(&self, user: UserId) -> Vec<HomeKey> {
        self.homes
            .get(&user)
            .map(|homes| homes.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of homes a user currently has loaded.
    pub fn count(&self, user: UserId) -> usize {
        self.homes.get(&user).map(|homes| homes.len()).unwrap_or(0)
    }

    /// Insert a new home under its canonical key. First writer wins:
    /// returns `false` and leaves the store untouched when the key is
    /// already taken.
    pub fn insert(&self, user: UserId, home: Home) -> bool {
        let mut homes = self.homes.entry(user).or_insert_with(HashMap::new);
        let key = home.key();
        if homes.contains_key(&key) {
            return false;
        }
        homes.insert(key, home);
        true
    }

    /// Remove a home only if the stored record equals the one the
    /// caller holds. A stale handle never removes a newer record that
    /// replaced it under the same key.
    pub fn remove(&self, user: UserId, home: &Home) -> Option<Home> {
        let mut homes = self.homes.get_mut(&user)?;
        let key = home.key();
        if !homes.get(&key).is_some_and(|stored| stored == home) {
            return None;
        }
        homes.remove(&key)
    }

    /// Remove whatever is stored under the canonical form of `name`.
    pub fn remove_by_name(&self, user: UserId, name: &str) -> Option<Home> {
        let mut homes = self.homes.get_mut(&user)?;
        homes.remove(&HomeKey::new(name))
    }

    /// Bulk-merge records from the load path. Unlike [`HomeStore::insert`],
    /// incoming records overwrite existing keys, and within `homes` the
    /// last record under a key wins. The user's sub-map is created even
    /// when `homes` is empty.
    pub fn load(&self, user: UserId, homes: Vec<Home>) {
        let mut current = self.homes.entry(user).or_insert_with(HashMap::new);
        for home in homes {
            current.insert(home.key(), home);
        }
    }

    /// Atomically take a user's homes and evict the sub-map.
    pub fn drain(&self, user: UserId) -> Vec<Home> {
        self.homes
            .remove(&user)
            .map(|(_, homes)| homes.into_values().collect())
            .unwrap_or_default()
    }

    /// Same records as [`HomeStore::drain`] would yield, without evicting.
    pub fn snapshot(&self, user: UserId) -> Vec<Home> {
        self.list(user)
    }

    /// Users that currently have a sub-map, loaded or merely created.
    pub fn users(&self) -> Vec<UserId> {
        self.homes.iter().map(|entry| *entry.key()).collect()
    }

    /// Drop every sub-map. Used at process shutdown, after flushing.
    pub fn clear(&self) {
        self.homes.clear();
    }
}
