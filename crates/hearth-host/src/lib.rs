//! Hearth Host - command surface and hosting-environment boundary

pub mod commands;
pub mod config;
pub mod teleport;

pub use commands::{DeleteOutcome, HomeCommands, Position, SetOutcome, VisitOutcome};
pub use config::HostConfig;
pub use teleport::{LogTeleporter, Teleporter};
