//! The reservation-tracking guard.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::fingerprint::Fingerprint;

/// Lifecycle of a fingerprint slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    /// Admitted; a submission is in flight. Released on rejection/failure.
    Reserved,
    /// Successfully forwarded and settled. Permanent.
    Committed,
}

/// Concurrent-safe set of reserved and committed submission fingerprints.
///
/// Construct one per pipeline and inject it; there is no global instance,
/// so tests run against isolated guards and a future bounded (TTL or
/// size-capped) variant can replace the map without touching pipeline
/// logic.
///
/// # Thread Safety
///
/// All operations take `&self`; share the guard behind an `Arc`. The inner
/// mutex is held only for a single map operation per call.
#[derive(Debug, Default)]
pub struct ReplayGuard {
    slots: Mutex<HashMap<Fingerprint, SlotState>>,
}

impl ReplayGuard {
    /// Creates an empty guard. State starts empty at process start and
    /// grows monotonically with committed fingerprints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically tests and reserves a fingerprint.
    ///
    /// Returns `true` iff the fingerprint was neither reserved nor
    /// committed; the caller then holds the reservation and must end it
    /// with exactly one [`commit`](Self::commit) or
    /// [`release`](Self::release). Returns `false` for a duplicate without
    /// changing any state.
    pub fn try_admit(&self, fingerprint: &Fingerprint) -> bool {
        match self.lock().entry(fingerprint.clone()) {
            Entry::Occupied(slot) => {
                debug!(%fingerprint, state = ?slot.get(), "duplicate submission refused");
                false
            }
            Entry::Vacant(slot) => {
                slot.insert(SlotState::Reserved);
                true
            }
        }
    }

    /// Marks a fingerprint as committed, unconditionally and permanently.
    ///
    /// Called only after the settlement layer accepted the reading.
    pub fn commit(&self, fingerprint: &Fingerprint) {
        self.lock().insert(fingerprint.clone(), SlotState::Committed);
    }

    /// Drops a reservation so the fingerprint can be retried.
    ///
    /// Called on the rejection and forwarding-failure paths. Never removes
    /// a committed entry: a settled reading stays settled.
    pub fn release(&self, fingerprint: &Fingerprint) {
        let mut slots = self.lock();
        if slots.get(fingerprint) == Some(&SlotState::Reserved) {
            slots.remove(fingerprint);
        }
    }

    /// Whether a fingerprint has been committed (not merely reserved).
    pub fn is_committed(&self, fingerprint: &Fingerprint) -> bool {
        self.lock().get(fingerprint) == Some(&SlotState::Committed)
    }

    /// Number of committed fingerprints.
    pub fn committed_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|state| **state == SlotState::Committed)
            .count()
    }

    /// The state transitions are single map operations, so a panic can
    /// never leave a slot half-written; a poisoned lock is safe to reclaim.
    fn lock(&self) -> MutexGuard<'_, HashMap<Fingerprint, SlotState>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
