//! Configuration management for Redoubt.

use crate::error::Result;
use crate::time::MILLIS_PER_DAY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafeModeConfig {
    pub storage: StorageConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub trust: TrustConfig,
}

/// Where the persisted configuration record lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub state_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Maximum age of a pushed record before it is treated as expired.
    pub ttl_ms: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 30 * MILLIS_PER_DAY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrustConfig {
    #[serde(default)]
    pub anchors: Vec<TrustAnchorConfig>,
}

/// Expected identity of one package allowed to push configuration.
///
/// Digests are SHA-256 over the signing certificate's DER bytes, written as
/// hex strings in the config file. The debug digest is optional and only
/// honored on debug builds of the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustAnchorConfig {
    pub package: String,
    pub release_cert_sha256: String,
    #[serde(default)]
    pub debug_cert_sha256: Option<String>,
}

impl SafeModeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig {
                state_file: PathBuf::from("/var/lib/redoubt/safe_mode.json"),
            },
            policy: PolicyConfig::default(),
            trust: TrustConfig::default(),
        }
    }
}
