//! Certificate digest newtype.

use crate::error::TrustError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a certificate digest in bytes (SHA-256).
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest of a signing certificate's DER encoding.
///
/// Rendered as lowercase hex; parsed case-insensitively. Comparison is
/// plain byte equality: the digest is public identity material, not a
/// secret, so constant-time comparison buys nothing here.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CertDigest([u8; DIGEST_LEN]);

impl CertDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Digest a certificate's DER bytes.
    pub fn from_der(der: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(der);
        Self(hasher.finalize().into())
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }
}

impl fmt::Display for CertDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for CertDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CertDigest({})", hex::encode(self.0))
    }
}

impl FromStr for CertDigest {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|e| TrustError::InvalidHex(e.to_string()))?;
        let bytes: [u8; DIGEST_LEN] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| TrustError::InvalidLength(b.len()))?;
        Ok(Self(bytes))
    }
}

impl Serialize for CertDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CertDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
