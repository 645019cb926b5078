//! Default-home resolution for zero- and one-argument commands.

use crate::store::HomeStore;
use hearth_core::{Home, UserId};
use std::sync::Arc;

/// Name a bare command acts on when the caller does not say which home.
pub const DEFAULT_HOME_NAME: &str = "home";

/// Picks the home a command invocation refers to.
///
/// An explicit name always wins: any argument other than the default
/// token is looked up verbatim, and its miss is final. Only a missing
/// argument, or the default token itself, falls back to the stored
/// default home and then to the user's single home when they have
/// exactly one.
pub struct DefaultResolver {
    store: Arc<HomeStore>,
    default_name: String,
}

impl DefaultResolver {
    pub fn new(store: Arc<HomeStore>) -> Self {
        Self::with_default_name(store, DEFAULT_HOME_NAME)
    }

    pub fn with_default_name(store: Arc<HomeStore>, default_name: impl Into<String>) -> Self {
        Self {
            store,
            default_name: default_name.into(),
        }
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Resolve `arg` (or its absence) to a home, if any.
    pub fn resolve(&self, user: UserId, arg: Option<&str>) -> Option<Home> {
        if self.store.count(user) == 0 {
            return None;
        }

        // The default token compares case-insensitively, so "HOME" asks
        // for the default rather than naming a home called HOME. Same
        // lowercasing as canonical keys, to keep the two in agreement.
        if let Some(arg) = arg {
            if arg.to_lowercase() != self.default_name.to_lowercase() {
                return self.store.find(user, arg);
            }
        }

        if let Some(home) = self.store.find(user, &self.default_name) {
            return Some(home);
        }

        let mut homes = self.store.list(user);
        if homes.len() == 1 {
            homes.pop()
        } else {
            None
        }
    }
}
