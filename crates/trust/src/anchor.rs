//! Per-package trust anchors.

use crate::digest::CertDigest;
use crate::error::TrustError;
use redoubt_core::config::TrustAnchorConfig;
use serde::{Deserialize, Serialize};

/// Expected identity for one package allowed to push configuration.
///
/// A caller is trusted iff its package name matches and its presented
/// certificate digest equals the release digest, or, on a debug build of
/// the host only, the optional debug digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustAnchor {
    /// Package name of the allowed caller
    pub package_name: String,
    /// Digest of the caller's release signing certificate
    pub release_digest: CertDigest,
    /// Digest of the caller's debug signing certificate, if any
    pub debug_digest: Option<CertDigest>,
}

impl TrustAnchor {
    /// Create an anchor that trusts only the release certificate.
    pub fn new(package_name: impl Into<String>, release_digest: CertDigest) -> Self {
        Self {
            package_name: package_name.into(),
            release_digest,
            debug_digest: None,
        }
    }

    /// Add a debug-build certificate digest.
    pub fn with_debug_digest(mut self, digest: CertDigest) -> Self {
        self.debug_digest = Some(digest);
        self
    }

    /// Build an anchor from its configuration entry, parsing hex digests.
    pub fn from_config(config: &TrustAnchorConfig) -> Result<Self, TrustError> {
        let release_digest = config.release_cert_sha256.parse()?;
        let debug_digest = config
            .debug_cert_sha256
            .as_deref()
            .map(str::parse)
            .transpose()?;
        Ok(Self {
            package_name: config.package.clone(),
            release_digest,
            debug_digest,
        })
    }

    /// Decide whether a claimed caller identity matches this anchor.
    ///
    /// Pure function of its inputs. The debug digest is never honored when
    /// `debug_build` is false, so a leaked debug certificate cannot push
    /// configuration to production hosts.
    pub fn verify(&self, claimed_package: &str, presented: &CertDigest, debug_build: bool) -> bool {
        if claimed_package != self.package_name {
            return false;
        }
        if *presented == self.release_digest {
            return true;
        }
        debug_build && self.debug_digest.as_ref() == Some(presented)
    }
}
