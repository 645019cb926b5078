//! Movement boundary between the command surface and the host.
//!
//! Actually carrying a user somewhere is the hosting environment's job;
//! the commands only hand over a destination and report how it went.

use async_trait::async_trait;
use hearth_core::{Home, UserId};
use tracing::info;

/// Carries a user to a home and reports once the movement settles.
///
/// Failure reasons are plain text for the host to render; the command
/// layer passes them through without interpreting them.
#[async_trait]
pub trait Teleporter: Send + Sync {
    async fn send(&self, user: UserId, home: &Home) -> Result<(), String>;
}

/// Teleporter that always arrives and just logs the trip.
#[derive(Default)]
pub struct LogTeleporter;

#[async_trait]
impl Teleporter for LogTeleporter {
    async fn send(&self, user: UserId, home: &Home) -> Result<(), String> {
        info!("{} teleported to {}", user, home);
        Ok(())
    }
}
