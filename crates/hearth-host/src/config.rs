//! Host configuration
//!
//! Loaded from a TOML file at startup, falling back to defaults when
//! the file is missing or malformed.

use hearth_store::{SyncConfig, DEFAULT_HOME_NAME};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Name a bare `home` or `sethome` acts on.
    pub default_home_name: String,
    pub autosave: AutosaveConfig,
    pub vault: VaultConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Seconds before the first flush after startup.
    pub initial_delay_secs: u64,
    /// Seconds between flushes of all active users.
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Directory holding one blob file per user.
    pub dir: PathBuf,
}

// ============================================================
// Defaults
// ============================================================

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            default_home_name: DEFAULT_HOME_NAME.to_string(),
            autosave: AutosaveConfig::default(),
            vault: VaultConfig::default(),
        }
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: 10,
            interval_secs: 300,
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("hearth-data"),
        }
    }
}

// ============================================================
// Loading
// ============================================================

impl HostConfig {
    /// Load configuration from a TOML file, or fall back to defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => {
                    info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("could not parse {}, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("no config at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Render the active configuration back out as TOML.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Autosave cadence in the session layer's terms.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            autosave_initial_delay: Duration::from_secs(self.autosave.initial_delay_secs),
            autosave_interval: Duration::from_secs(self.autosave.interval_secs),
        }
    }
}
