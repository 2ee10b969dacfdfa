//! # Replay Guard
//!
//! Tracks which telemetry submissions have already been paid out and makes
//! the admit-check-to-commit window race-free per fingerprint.
//!
//! ## Threat Model
//!
//! The settlement layer pays per accepted reading, so a node (or anyone on
//! the path) profits from getting one reading accepted twice:
//!
//! - **Straight replay**: resubmitting an already-settled reading.
//! - **Concurrent double-submit**: firing the same reading down N parallel
//!   connections so that every copy passes a naive membership check before
//!   any copy is recorded.
//!
//! The guard closes both with a single atomic "absent? then reserve"
//! operation ([`ReplayGuard::try_admit`]): of N concurrent submissions that
//! share a fingerprint, exactly one acquires the reservation.
//!
//! ## Reservation protocol
//!
//! ```text
//!            try_admit                commit
//!   absent ────────────► reserved ────────────► committed (permanent)
//!     ▲                     │
//!     └─────────────────────┘
//!            release
//! ```
//!
//! The *pipeline* owns the policy: commit only after a successful forward,
//! release on every rejection or failure path. The guard itself only
//! answers true/false and cannot fail.
//!
//! ## Notes
//!
//! - The slot map is guarded by one mutex held only for the O(1) map
//!   operation, never across I/O, so unrelated fingerprints are not
//!   serialized behind a slow settlement call.
//! - Committed entries never expire. Whether fingerprints should ever be
//!   evicted is an unresolved retention decision; the guard deliberately
//!   carries no TTL until one is made.

mod fingerprint;
mod guard;

pub use fingerprint::Fingerprint;
pub use guard::ReplayGuard;
