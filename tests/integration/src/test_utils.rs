//! Shared fixtures for the integration suite.

use redoubt_safemode::{FileRecordStore, SafeModeAction, SafeModeController, SafeModeStore};
use redoubt_trust::{CertDigest, TrustAnchor, TrustVerifier};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Package name used by the trusted operator in these tests.
pub const OPERATOR_PACKAGE: &str = "com.example.operator";

/// Digest of the operator's release signing certificate.
pub fn release_digest() -> CertDigest {
    CertDigest::from_der(b"integration release cert")
}

/// Digest of the operator's debug signing certificate.
pub fn debug_digest() -> CertDigest {
    CertDigest::from_der(b"integration debug cert")
}

/// Build a controller over a file-backed store, as a fresh process would.
/// Calling this twice with the same path simulates a restart.
pub fn controller_at(state_file: &Path, ttl_ms: u64) -> SafeModeController {
    redoubt_core::logging::init();
    let mut verifier = TrustVerifier::new();
    verifier.register_anchor(
        TrustAnchor::new(OPERATOR_PACKAGE, release_digest()).with_debug_digest(debug_digest()),
    );
    let store = SafeModeStore::with_ttl(Box::new(FileRecordStore::new(state_file)), ttl_ms);
    SafeModeController::new(verifier, store).with_debug_build(false)
}

/// Action that appends its id to a shared log and returns a fixed result.
pub struct LoggingAction {
    id: String,
    result: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl LoggingAction {
    pub fn boxed(id: &str, result: bool, log: &Arc<Mutex<Vec<String>>>) -> Box<dyn SafeModeAction> {
        Box::new(Self {
            id: id.to_string(),
            result,
            log: Arc::clone(log),
        })
    }
}

impl SafeModeAction for LoggingAction {
    fn id(&self) -> &str {
        &self.id
    }

    fn execute(&self) -> bool {
        self.log.lock().unwrap().push(self.id.clone());
        self.result
    }
}

/// Build an id set from string literals.
pub fn ids(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}
