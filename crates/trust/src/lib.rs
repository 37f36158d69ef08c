//! Caller authentication for safe mode configuration pushes.
//!
//! A configuration push arrives over IPC with a claimed package name and
//! the SHA-256 digest of the caller's signing certificate. This crate
//! decides whether that pair matches a known trust anchor. Verification is
//! a pure decision with no side effects: an untrusted caller is answered
//! with `false`, never with an error, and it is the transport's job to
//! drop the push.

pub mod anchor;
pub mod digest;
pub mod error;
pub mod verifier;

pub use anchor::TrustAnchor;
pub use digest::{CertDigest, DIGEST_LEN};
pub use error::TrustError;
pub use verifier::TrustVerifier;
