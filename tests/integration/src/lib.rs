//! Integration tests for the Redoubt safe mode subsystem.
//!
//! This test suite validates the full control flow across crate
//! boundaries:
//! - authenticated push → persisted record → query → ordered execution
//! - process-restart behavior of the file-backed record store
//! - expiry, renewal, and fast-path flag healing across restarts
//! - rejection of untrusted pushes at the facade

pub mod test_utils;

#[cfg(test)]
mod lifecycle_tests;
