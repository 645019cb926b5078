//! Core types shared across hearth crates

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a user, owned by the hosting environment.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Stable identity of a world, owned by the hosting environment.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(Uuid);

impl WorldId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for WorldId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Canonical lookup key for a home name.
///
/// Construction lowercases the name and replaces spaces with
/// underscores, so `"My House"`, `"my house"`, and `"my_house"` all
/// produce the same key. Canonicalization is idempotent: feeding a
/// key's string form back in yields an equal key.
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct HomeKey(String);

impl HomeKey {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase().replace(' ', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HomeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HomeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A named location saved by a user.
///
/// Records are immutable once created; updating a home means removing
/// the old record and inserting a new one. The `name` keeps whatever
/// case and spacing the user typed, while lookups go through
/// [`HomeKey`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub name: String,
    pub world: WorldId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Home {
    pub fn new(
        name: impl Into<String>,
        world: WorldId,
        x: f64,
        y: f64,
        z: f64,
        yaw: f32,
        pitch: f32,
    ) -> Self {
        Self {
            name: name.into(),
            world,
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }

    /// The canonical key this home is stored and looked up under.
    pub fn key(&self) -> HomeKey {
        HomeKey::new(&self.name)
    }
}

impl fmt::Display for Home {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({:.2}, {:.2}, {:.2}) in {}",
            self.name, self.x, self.y, self.z, self.world
        )
    }
}
