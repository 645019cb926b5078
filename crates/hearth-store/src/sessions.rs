//! Session synchronizer: keeps the home cache and the vault in step.
//!
//! Activation reads and decodes the user's blob into the store.
//! Deactivation drains the store and writes the blob back. A background
//! autosave task additionally flushes every active user in place on a
//! fixed cadence. Vault I/O always happens outside store guards.
//!
//! Each user has a flush gate. A deactivation holds the gate across its
//! whole drain-encode-write sequence, and the autosave pass only tries
//! the gate, skipping users mid-deactivation. The gate is what makes
//! "session end wins" hold: once a deactivation has drained, no stale
//! autosave snapshot can land in the vault after its write.

use crate::codec;
use crate::store::HomeStore;
use crate::vault::HomeVault;
use dashmap::{DashMap, DashSet};
use hearth_core::{Home, Result, UserId};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Autosave cadence. The defaults flush once shortly after startup and
/// then every five minutes.
#[derive(Clone, Debug)]
pub struct SyncConfig {
    pub autosave_initial_delay: Duration,
    pub autosave_interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            autosave_initial_delay: Duration::from_secs(10),
            autosave_interval: Duration::from_secs(300),
        }
    }
}

pub struct SessionSync {
    store: Arc<HomeStore>,
    vault: Arc<dyn HomeVault>,
    config: SyncConfig,
    active: DashSet<UserId>,
    flush_gates: DashMap<UserId, Arc<Mutex<()>>>,
    autosave: Mutex<Option<(CancellationToken, JoinHandle<()>)>>,
}

impl SessionSync {
    pub fn new(store: Arc<HomeStore>, vault: Arc<dyn HomeVault>, config: SyncConfig) -> Self {
        Self {
            store,
            vault,
            config,
            active: DashSet::new(),
            flush_gates: DashMap::new(),
            autosave: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<HomeStore> {
        &self.store
    }

    /// Users with a session currently open.
    pub fn active_users(&self) -> Vec<UserId> {
        self.active.iter().map(|user| *user).collect()
    }

    fn flush_gate(&self, user: UserId) -> Arc<Mutex<()>> {
        self.flush_gates
            .entry(user)
            .or_insert_with(Default::default)
            .clone()
    }

    /// A session began: load the user's stored homes, if any.
    ///
    /// A malformed blob is logged and treated as no stored homes; one
    /// user's corrupt data never disturbs anyone else's session. Records
    /// already in memory for the user are overwritten key by key, so the
    /// freshly decoded data wins.
    pub async fn on_user_active(&self, user: UserId) {
        self.active.insert(user);

        let blob = match self.vault.read(user).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("no stored homes for {}", user);
                return;
            }
            Err(e) => {
                warn!("could not read home blob for {}: {}", user, e);
                return;
            }
        };

        match codec::decode(&blob) {
            Ok(homes) => {
                info!("loaded {} home(s) for {}", homes.len(), user);
                self.store.load(user, homes);
            }
            Err(e) => {
                warn!("could not decode homes for {}, treating as none: {}", user, e);
            }
        }
    }

    /// A session ended: drain the user's homes and persist them.
    ///
    /// The flush gate is held across the whole drain-encode-write, so a
    /// concurrent autosave pass skips this user instead of racing the
    /// drain. An empty drain writes nothing, leaving whatever blob the
    /// vault already holds. If the write fails the drained records are
    /// put back; a rejoin's autosave or the final shutdown pass retries
    /// them.
    pub async fn on_user_inactive(&self, user: UserId) {
        self.active.remove(&user);

        let gate = self.flush_gate(user);
        {
            let _held = gate.lock().await;

            let homes = self.store.drain(user);
            if !homes.is_empty() {
                match self.write_blob(user, &homes).await {
                    Ok(()) => info!("saved {} home(s) for departing {}", homes.len(), user),
                    Err(e) => {
                        warn!("could not save homes for {}, keeping them in memory: {}", user, e);
                        self.store.load(user, homes);
                    }
                }
            }
        }

        drop(gate);
        // Reap the gate only when no flush still holds a handle to it.
        self.flush_gates
            .remove_if(&user, |_, gate| Arc::strong_count(gate) == 1);
    }

    /// Flush one user's current homes without evicting them.
    ///
    /// Returns `false` when the user's gate is busy, which means a
    /// deactivation is mid-flight and will write fresher state than our
    /// snapshot. A failed write is logged and left for the next cycle;
    /// the records stay in memory either way.
    pub async fn flush_user(&self, user: UserId) -> bool {
        let gate = self.flush_gate(user);
        let held = match gate.try_lock() {
            Ok(held) => held,
            Err(_) => {
                debug!("flush of {} skipped, deactivation in progress", user);
                return false;
            }
        };

        let homes = self.store.snapshot(user);
        if !homes.is_empty() {
            if let Err(e) = self.write_blob(user, &homes).await {
                warn!("autosave failed for {}, will retry next cycle: {}", user, e);
            }
        }

        drop(held);
        true
    }

    /// One autosave pass over every active user.
    pub async fn flush_active(&self) {
        for user in self.active_users() {
            self.flush_user(user).await;
        }
    }

    async fn write_blob(&self, user: UserId, homes: &[Home]) -> Result<()> {
        let blob = codec::encode(homes)?;
        self.vault.write(user, &blob).await
    }

    /// Start the background autosave task. Does nothing if one is
    /// already running.
    pub async fn spawn_autosave(self: Arc<Self>) {
        let mut slot = self.autosave.lock().await;
        if slot.is_some() {
            warn!("autosave task already running");
            return;
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn({
            let sync = Arc::clone(&self);
            let token = token.clone();
            async move {
                let start = Instant::now() + sync.config.autosave_initial_delay;
                let mut ticks = interval_at(start, sync.config.autosave_interval);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    tokio::select! {
                        _ = token.cancelled() => {
                            debug!("autosave task stopping");
                            return;
                        }
                        _ = ticks.tick() => {
                            sync.flush_active().await;
                        }
                    }
                }
            }
        });

        *slot = Some((token, handle));
        info!(
            "autosave running every {:?} (first pass in {:?})",
            self.config.autosave_interval, self.config.autosave_initial_delay
        );
    }

    /// Stop autosave, run a final deactivation pass over every user the
    /// store still holds records for, and clear the cache. No flush runs
    /// after this returns.
    pub async fn shutdown(&self) {
        if let Some((token, handle)) = self.autosave.lock().await.take() {
            token.cancel();
            if let Err(e) = handle.await {
                warn!("autosave task did not stop cleanly: {}", e);
            }
        }

        // The store can hold records for users no longer on the roster
        // when an earlier deactivation write failed and restored them.
        // The final pass is their last retry before the cache is gone.
        let mut users = self.active_users();
        for user in self.store.users() {
            if !users.contains(&user) {
                users.push(user);
            }
        }
        for user in users {
            self.on_user_inactive(user).await;
        }

        self.store.clear();
        info!("session sync shut down");
    }
}
