//! # Replay Guard Integration Tests
//!
//! Exercises the guard under the concurrent double-submit threat: many
//! threads racing the same fingerprint must yield exactly one reservation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use wattgate_replay::{Fingerprint, ReplayGuard};

#[test]
fn test_concurrent_double_submit_admits_exactly_one() {
    let guard = Arc::new(ReplayGuard::new());
    let admitted = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let guard = Arc::clone(&guard);
            let admitted = Arc::clone(&admitted);
            thread::spawn(move || {
                if guard.try_admit(&Fingerprint::new("node-a", 1000)) {
                    admitted.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(admitted.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_distinct_fingerprints_all_admitted() {
    let guard = Arc::new(ReplayGuard::new());

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let guard = Arc::clone(&guard);
            thread::spawn(move || guard.try_admit(&Fingerprint::new("node-a", i)))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_admit_release_cycle_under_contention() {
    // Threads repeatedly reserve and release one fingerprint; the slot must
    // never be lost or duplicated, and must end reusable.
    let guard = Arc::new(ReplayGuard::new());
    let fp = Fingerprint::new("node-a", 42);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = Arc::clone(&guard);
            let fp = fp.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    if guard.try_admit(&fp) {
                        guard.release(&fp);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(guard.try_admit(&fp));
    assert!(!guard.is_committed(&fp));
}
