//! Ordered catalogue of safe mode actions.

use std::collections::{BTreeSet, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, warn};

/// One unit of remediation.
///
/// Actions are constructed by the hosting application at startup,
/// registered exactly once, and may run zero or many times over the
/// process's life. `execute` reports success; it is expected to be fast
/// and is run synchronously on the caller's thread.
pub trait SafeModeAction: Send + Sync {
    /// Stable identifier, unique across the registered catalogue.
    fn id(&self) -> &str;

    /// Run the remediation. `true` means it took effect.
    fn execute(&self) -> bool;
}

/// Registration and execution errors. These are programming errors,
/// expected to be caught during development, not handled in production.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// `register` was called a second time
    #[error("Safe mode actions already registered")]
    AlreadyRegistered,

    /// Two registered actions share an id
    #[error("Duplicate safe mode action id: {id}")]
    DuplicateActionId {
        /// The offending id
        id: String,
    },

    /// `execute` was called before `register`
    #[error("Safe mode actions not registered")]
    NotRegistered,
}

/// Set-once, ordered registry of the executable actions.
///
/// The registered sequence is the execution order, always. A request never
/// reorders it, a failing action never aborts it.
#[derive(Default)]
pub struct ActionRegistry {
    actions: OnceLock<Vec<Box<dyn SafeModeAction>>>,
}

impl ActionRegistry {
    /// Create an empty, unregistered registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the action catalogue. At most once per registry; the first
    /// registration stays intact if a second one is attempted.
    pub fn register(&self, actions: Vec<Box<dyn SafeModeAction>>) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        for action in &actions {
            if !seen.insert(action.id().to_string()) {
                return Err(RegistryError::DuplicateActionId {
                    id: action.id().to_string(),
                });
            }
        }
        let count = actions.len();
        self.actions
            .set(actions)
            .map_err(|_| RegistryError::AlreadyRegistered)?;
        info!(actions = count, "safe mode action catalogue registered");
        Ok(())
    }

    /// Whether `register` has run.
    pub fn is_registered(&self) -> bool {
        self.actions.get().is_some()
    }

    /// Ids of the registered actions, in registration order.
    pub fn registered_ids(&self) -> Vec<&str> {
        self.actions
            .get()
            .map(|actions| actions.iter().map(|a| a.id()).collect())
            .unwrap_or_default()
    }

    /// Run every registered action whose id is in `requested_ids`.
    ///
    /// Iteration follows registration order regardless of how
    /// `requested_ids` iterates; requested ids that match nothing are
    /// ignored. Every matching action runs exactly once, and a failure
    /// never skips later actions. Returns the AND of the individual results,
    /// vacuously `true` when nothing matched.
    ///
    /// A panicking action is caught and counted as a failure; the
    /// subsystem's job is to keep running the rest, not to crash the host.
    pub fn execute(&self, requested_ids: &BTreeSet<String>) -> Result<bool, RegistryError> {
        let actions = self.actions.get().ok_or(RegistryError::NotRegistered)?;

        let mut all_succeeded = true;
        for action in actions {
            if !requested_ids.contains(action.id()) {
                continue;
            }
            let started = Instant::now();
            let succeeded = panic::catch_unwind(AssertUnwindSafe(|| action.execute()))
                .unwrap_or_else(|_| {
                    error!(id = action.id(), "safe mode action panicked");
                    false
                });
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if succeeded {
                info!(id = action.id(), elapsed_ms, "safe mode action succeeded");
            } else {
                warn!(id = action.id(), elapsed_ms, "safe mode action failed");
            }
            all_succeeded &= succeeded;
        }
        Ok(all_succeeded)
    }
}
