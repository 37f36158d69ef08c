//! Safe mode for a shared platform component.
//!
//! A trusted operator pushes a set of action ids over IPC; this crate
//! persists that configuration for a bounded time and runs the named
//! remediation actions on request. The moving parts:
//!
//! - [`store::SafeModeStore`]: the time-boxed configuration record, with
//!   a cheap enabled flag (fast path) and an expiry-enforcing action query
//!   (slow path),
//! - [`registry::ActionRegistry`]: the fixed, ordered catalogue of
//!   actions, executed without short-circuiting,
//! - [`controller::SafeModeController`]: the facade the transport and
//!   the hosting application talk to, gating pushes through
//!   `redoubt-trust`.
//!
//! Any ambiguity about the persisted configuration (missing, malformed,
//! expired, clock-skewed) resolves to "safe mode off": a bad record can
//! only fail to disable a feature, never disable one forever.

pub mod controller;
pub mod persist;
pub mod record;
pub mod registry;
pub mod store;

pub use controller::{PushOutcome, SafeModeController};
pub use persist::{FileRecordStore, MemoryRecordStore, RecordStore, StoreError};
pub use record::ConfigRecord;
pub use registry::{ActionRegistry, RegistryError, SafeModeAction};
pub use store::{SafeModeStore, DEFAULT_TTL_MS};
