//! User-facing home commands, with outcomes as data.
//!
//! Three actions cover the surface: set a home at the caller's position,
//! visit a home, delete a home. Each returns an outcome enum instead of
//! printing anything, so hosts decide how to phrase results.

use crate::teleport::Teleporter;
use hearth_core::{Home, HomeKey, UserId, WorldId};
use hearth_store::{DefaultResolver, HomeStore};
use std::sync::Arc;

/// The caller's current location, supplied by the hosting environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub world: WorldId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SetOutcome {
    Created(Home),
    /// A home with a colliding canonical name exists; nothing changed.
    AlreadyExists(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum VisitOutcome {
    Departed(Home),
    NoSuchHome,
    TeleportFailed { home: Home, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DeleteOutcome {
    Removed(Home),
    NoSuchHome,
}

pub struct HomeCommands {
    store: Arc<HomeStore>,
    resolver: DefaultResolver,
    teleporter: Arc<dyn Teleporter>,
}

impl HomeCommands {
    pub fn new(
        store: Arc<HomeStore>,
        resolver: DefaultResolver,
        teleporter: Arc<dyn Teleporter>,
    ) -> Self {
        Self {
            store,
            resolver,
            teleporter,
        }
    }

    /// Set a home at `position`. A missing name means the default home.
    pub fn set(&self, user: UserId, name: Option<&str>, position: Position) -> SetOutcome {
        let name = name.unwrap_or_else(|| self.resolver.default_name());
        let home = Home::new(
            name,
            position.world,
            position.x,
            position.y,
            position.z,
            position.yaw,
            position.pitch,
        );

        if self.store.insert(user, home.clone()) {
            SetOutcome::Created(home)
        } else {
            SetOutcome::AlreadyExists(home.name)
        }
    }

    /// Travel to a home and report how the trip went.
    pub async fn visit(&self, user: UserId, name: Option<&str>) -> VisitOutcome {
        let Some(home) = self.resolver.resolve(user, name) else {
            return VisitOutcome::NoSuchHome;
        };

        match self.teleporter.send(user, &home).await {
            Ok(()) => VisitOutcome::Departed(home),
            Err(reason) => VisitOutcome::TeleportFailed { home, reason },
        }
    }

    /// Delete a home. Only the exact record that resolution produced is
    /// removed, so a record replaced in the meantime survives.
    pub fn delete(&self, user: UserId, name: Option<&str>) -> DeleteOutcome {
        let Some(home) = self.resolver.resolve(user, name) else {
            return DeleteOutcome::NoSuchHome;
        };

        match self.store.remove(user, &home) {
            Some(removed) => DeleteOutcome::Removed(removed),
            None => DeleteOutcome::NoSuchHome,
        }
    }

    /// Current snapshot of the caller's homes, for listing.
    pub fn homes(&self, user: UserId) -> Vec<Home> {
        self.store.list(user)
    }

    /// Canonical names for completion surfaces.
    pub fn completions(&self, user: UserId) -> Vec<HomeKey> {
        self.store.keys(user)
    }
}
