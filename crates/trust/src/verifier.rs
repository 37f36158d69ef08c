//! Anchor catalogue and push verification.

use crate::anchor::TrustAnchor;
use crate::digest::CertDigest;
use crate::error::TrustError;
use redoubt_core::config::TrustAnchorConfig;
use std::collections::HashMap;
use tracing::debug;

/// Verifier holding the known trust anchors, keyed by package name.
#[derive(Debug, Default)]
pub struct TrustVerifier {
    anchors: HashMap<String, TrustAnchor>,
}

impl TrustVerifier {
    /// Create an empty verifier that trusts no one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a verifier from configuration entries.
    pub fn from_config(entries: &[TrustAnchorConfig]) -> Result<Self, TrustError> {
        let mut verifier = Self::new();
        for entry in entries {
            verifier.register_anchor(TrustAnchor::from_config(entry)?);
        }
        Ok(verifier)
    }

    /// Register a trust anchor. A later anchor for the same package
    /// replaces the earlier one.
    pub fn register_anchor(&mut self, anchor: TrustAnchor) {
        self.anchors.insert(anchor.package_name.clone(), anchor);
    }

    /// Number of registered anchors.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Decide whether a claimed caller identity is trusted.
    ///
    /// An unknown package answers `false`; untrusted input is refused, not
    /// reported as an error.
    pub fn verify(&self, claimed_package: &str, presented: &CertDigest, debug_build: bool) -> bool {
        match self.anchors.get(claimed_package) {
            Some(anchor) => anchor.verify(claimed_package, presented, debug_build),
            None => {
                debug!(package = claimed_package, "no trust anchor for package");
                false
            }
        }
    }
}
