//! Time-boxed configuration store.

use crate::persist::{RecordStore, StoreError};
use crate::record::ConfigRecord;
use redoubt_core::time::{now_ms, MILLIS_PER_DAY};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Default maximum age of a pushed configuration: 30 days.
pub const DEFAULT_TTL_MS: u64 = 30 * MILLIS_PER_DAY;

/// The arbiter of the current safe mode configuration.
///
/// Two query tiers, kept deliberately distinct:
///
/// - [`is_enabled`](SafeModeStore::is_enabled) is the fast path: a bare
///   flag read with no expiry arithmetic and no persistence access, cheap
///   enough for every hot-path decision. It may report `true` for a record
///   that has already expired.
/// - [`query_actions`](SafeModeStore::query_actions) is the slow path: it
///   loads the record, enforces the TTL, and heals the flag when it finds
///   the record invalid. Callers that actually run actions always go
///   through it.
///
/// Expiry is lazy and observation-triggered; nothing sweeps the record in
/// the background.
pub struct SafeModeStore {
    backend: Box<dyn RecordStore>,
    ttl_ms: u64,
    enabled: AtomicBool,
}

impl SafeModeStore {
    /// Create a store with the default 30-day TTL.
    pub fn new(backend: Box<dyn RecordStore>) -> Self {
        Self::with_ttl(backend, DEFAULT_TTL_MS)
    }

    /// Create a store with an explicit TTL (tests shorten it).
    ///
    /// The enabled flag is seeded from whether a record currently exists,
    /// so a restarted process keeps the fast-path answer of its
    /// predecessor until the slow path runs.
    pub fn with_ttl(backend: Box<dyn RecordStore>, ttl_ms: u64) -> Self {
        let enabled = matches!(backend.load(), Ok(Some(_)));
        Self {
            backend,
            ttl_ms,
            enabled: AtomicBool::new(enabled),
        }
    }

    /// The TTL this store enforces.
    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Apply an authenticated push.
    ///
    /// Authentication happened upstream; this always overwrites the whole
    /// record and raises the enabled flag. Pushing again resets the
    /// freshness clock (renewal), and pushing an empty id set is the
    /// explicit-disable mechanism: the flag goes up but the next slow-path
    /// query normalizes the empty record away.
    pub fn push(&self, push_now_ms: u64, action_ids: BTreeSet<String>) -> Result<(), StoreError> {
        let count = action_ids.len();
        let record = ConfigRecord::new(action_ids, push_now_ms);
        self.backend.store(&record)?;
        self.enabled.store(true, Ordering::Release);
        info!(actions = count, pushed_at_ms = push_now_ms, "safe mode configuration stored");
        Ok(())
    }

    /// Fast path: is a safe mode push in effect, as far as anyone has
    /// observed? No TTL evaluation, no side effects.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Slow path: the currently active action ids.
    ///
    /// Loads the record and enforces expiry. An absent, empty, expired, or
    /// future-dated record (or a backend that cannot produce one) is
    /// normalized to the empty set: the record is cleared and the enabled
    /// flag drops. A valid record is returned untouched; querying never
    /// renews the timestamp.
    pub fn query_actions(&self, query_now_ms: u64) -> BTreeSet<String> {
        let record = match self.backend.load() {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "safe mode record unreadable, treating as absent");
                None
            }
        };

        match record {
            Some(record) if record.is_fresh(query_now_ms, self.ttl_ms) => record.action_ids,
            Some(record) => {
                info!(
                    pushed_at_ms = record.pushed_at_ms,
                    now_ms = query_now_ms,
                    "safe mode configuration invalid or expired, clearing"
                );
                self.invalidate();
                BTreeSet::new()
            }
            None => {
                self.invalidate();
                BTreeSet::new()
            }
        }
    }

    /// [`query_actions`](SafeModeStore::query_actions) against the wall
    /// clock.
    pub fn query_actions_now(&self) -> BTreeSet<String> {
        self.query_actions(now_ms())
    }

    fn invalidate(&self) {
        if let Err(e) = self.backend.clear() {
            warn!(error = %e, "failed to clear safe mode record");
        }
        self.enabled.store(false, Ordering::Release);
    }
}
