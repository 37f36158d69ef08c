//! Core functionality for the Redoubt safe mode subsystem.
//!
//! This crate provides the ambient infrastructure shared by the trust and
//! safe mode crates: typed errors, logging initialization, TOML
//! configuration, and epoch-millisecond time helpers.

pub mod config;
pub mod error;
pub mod logging;
pub mod time;

pub use config::{PolicyConfig, SafeModeConfig, StorageConfig, TrustAnchorConfig, TrustConfig};
pub use error::{CoreError, Result};
pub use time::now_ms;
