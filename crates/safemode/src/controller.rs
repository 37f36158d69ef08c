//! Facade wiring trust, store, and registry together.

use crate::persist::{FileRecordStore, StoreError};
use crate::registry::{ActionRegistry, RegistryError, SafeModeAction};
use crate::store::SafeModeStore;
use redoubt_core::config::SafeModeConfig;
use redoubt_core::time::now_ms;
use redoubt_trust::{CertDigest, TrustError, TrustVerifier};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// What became of a configuration push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// Caller was trusted; the configuration was stored
    Applied,
    /// Caller was not trusted; nothing changed
    Rejected,
}

/// The single handle the hosting application threads through to the IPC
/// receiver and its own startup code.
///
/// Constructed once at process startup (dependency injection, not an
/// ambient global). The registry keeps its own set-once check as well,
/// since several subsystems may hold references to the same controller.
pub struct SafeModeController {
    verifier: TrustVerifier,
    store: SafeModeStore,
    registry: ActionRegistry,
    debug_build: bool,
}

impl SafeModeController {
    /// Wire a controller from its parts. `debug_build` follows the host's
    /// compilation mode.
    pub fn new(verifier: TrustVerifier, store: SafeModeStore) -> Self {
        Self {
            verifier,
            store,
            registry: ActionRegistry::new(),
            debug_build: cfg!(debug_assertions),
        }
    }

    /// Override the build-mode gate for the debug certificate digest.
    /// Tests use this; production code keeps the compiled-in default.
    pub fn with_debug_build(mut self, debug_build: bool) -> Self {
        self.debug_build = debug_build;
        self
    }

    /// Build a controller from configuration: file-backed record store at
    /// the configured path, configured TTL, configured trust anchors.
    pub fn from_config(config: &SafeModeConfig) -> Result<Self, TrustError> {
        let verifier = TrustVerifier::from_config(&config.trust.anchors)?;
        let backend = FileRecordStore::new(&config.storage.state_file);
        let store = SafeModeStore::with_ttl(Box::new(backend), config.policy.ttl_ms);
        Ok(Self::new(verifier, store))
    }

    /// Transport entry point: authenticate the caller, then store the
    /// push. An untrusted caller is answered with
    /// [`PushOutcome::Rejected`] and causes no state change.
    pub fn handle_push(
        &self,
        claimed_package: &str,
        presented: &CertDigest,
        action_ids: BTreeSet<String>,
        push_now_ms: u64,
    ) -> Result<PushOutcome, StoreError> {
        if !self.verifier.verify(claimed_package, presented, self.debug_build) {
            warn!(
                package = claimed_package,
                digest = %presented,
                "rejected safe mode push from unverified caller"
            );
            return Ok(PushOutcome::Rejected);
        }
        self.store.push(push_now_ms, action_ids)?;
        info!(package = claimed_package, "safe mode push applied");
        Ok(PushOutcome::Applied)
    }

    /// Fast-path existence check. See [`SafeModeStore::is_enabled`].
    pub fn is_enabled(&self) -> bool {
        self.store.is_enabled()
    }

    /// Slow-path action query. See [`SafeModeStore::query_actions`].
    pub fn query_actions(&self, query_now_ms: u64) -> BTreeSet<String> {
        self.store.query_actions(query_now_ms)
    }

    /// Register the action catalogue, once, at startup.
    pub fn register_actions(
        &self,
        actions: Vec<Box<dyn SafeModeAction>>,
    ) -> Result<(), RegistryError> {
        self.registry.register(actions)
    }

    /// The once-per-process-start path: query the active set and run it in
    /// registration order. Returns whether every active action succeeded.
    pub fn execute_active_actions(&self, query_now_ms: u64) -> Result<bool, RegistryError> {
        let active = self.store.query_actions(query_now_ms);
        self.registry.execute(&active)
    }

    /// [`execute_active_actions`](SafeModeController::execute_active_actions)
    /// against the wall clock.
    pub fn execute_active_actions_now(&self) -> Result<bool, RegistryError> {
        self.execute_active_actions(now_ms())
    }
}
