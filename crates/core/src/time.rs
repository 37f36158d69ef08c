//! Epoch-millisecond time helpers.
//!
//! All timestamps in the subsystem are unsigned milliseconds since the Unix
//! epoch. Callers that need a testable clock pass `now_ms` values through
//! explicitly; this helper is the wall-clock source for the convenience
//! entry points.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds in one day.
pub const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Current wall-clock time as milliseconds since the Unix epoch.
///
/// A system clock set before the epoch reads as 0, which downstream
/// freshness checks treat as "everything persisted is in the future" and
/// therefore invalid.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
