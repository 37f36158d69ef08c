//! The persisted configuration record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One pushed safe mode configuration.
///
/// The record is replaced wholesale on every push and validated wholesale
/// on every read: a record missing either field fails deserialization and
/// is treated as absent, never partially repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Ids of the actions the operator activated
    pub action_ids: BTreeSet<String>,
    /// When the push happened (epoch milliseconds)
    pub pushed_at_ms: u64,
}

impl ConfigRecord {
    /// Create a record for a push at `pushed_at_ms`.
    pub fn new(action_ids: BTreeSet<String>, pushed_at_ms: u64) -> Self {
        Self {
            action_ids,
            pushed_at_ms,
        }
    }

    /// Whether this record is still meaningful at `now_ms`.
    ///
    /// An empty id set carries no configuration. The age computation is
    /// done with `checked_sub`, so a `pushed_at_ms` in the future (a
    /// manually adjusted clock) reads as invalid rather than
    /// valid-forever.
    pub fn is_fresh(&self, now_ms: u64, ttl_ms: u64) -> bool {
        if self.action_ids.is_empty() {
            return false;
        }
        match now_ms.checked_sub(self.pushed_at_ms) {
            Some(age_ms) => age_ms < ttl_ms,
            None => false,
        }
    }
}
