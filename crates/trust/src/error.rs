//! Trust configuration errors

use thiserror::Error;

/// Errors raised while building trust anchors from configuration.
///
/// These are configuration-time errors only. Runtime verification of a
/// caller never fails with an error; it answers `false`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrustError {
    /// Digest string is not valid hex
    #[error("Invalid digest hex: {0}")]
    InvalidHex(String),

    /// Digest decoded to the wrong number of bytes
    #[error("Invalid digest length: expected 32 bytes, got {0}")]
    InvalidLength(usize),
}
