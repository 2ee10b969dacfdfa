//! # WattGate Integration Tests
//!
//! End-to-end coverage of the gatekeeping guarantees across components.
//!
//! ## Property Coverage
//!
//! | Property | Test |
//! |----------|------|
//! | Idempotence (accept then duplicate) | `test_idempotent_resubmission` |
//! | Retry after anomaly rejection | `test_retry_after_anomaly_rejection` |
//! | Forwarding failure does not commit | `test_forwarding_failure_does_not_commit` |
//! | At most one forward per fingerprint | `test_concurrent_submissions_forward_once` |
//! | Unrelated fingerprints proceed concurrently | `test_slow_forward_does_not_serialize_others` |
//! | Timeout releases the reservation | `test_timeout_is_retryable` |

use std::sync::Arc;
use std::time::Duration;

use wattgate_core::{
    Forwarder, ForwarderError, ForwardingFault, GateConfig, Reading, ReplayGuard, StubForwarder,
    ThresholdClassifier, ValidationOutcome, ValidationPipeline,
};

fn pipeline(forwarder: Arc<dyn Forwarder>, config: GateConfig) -> Arc<ValidationPipeline> {
    Arc::new(ValidationPipeline::new(
        Arc::new(ThresholdClassifier::default()),
        Arc::new(ReplayGuard::new()),
        forwarder,
        config,
    ))
}

#[tokio::test]
async fn test_idempotent_resubmission() {
    let forwarder = Arc::new(StubForwarder::accepting());
    let gate = pipeline(Arc::clone(&forwarder) as Arc<dyn Forwarder>, GateConfig::default());
    let reading = Reading::new("node-a", 1000, 250.0);

    assert_eq!(gate.submit(&reading).await, ValidationOutcome::Accepted);
    assert_eq!(gate.submit(&reading).await, ValidationOutcome::DuplicateRejected);
    assert_eq!(forwarder.calls(), 1);
}

#[tokio::test]
async fn test_retry_after_anomaly_rejection() {
    let gate = pipeline(Arc::new(StubForwarder::accepting()), GateConfig::default());

    // Implausible reading gets a specific rejection...
    let bogus = Reading::new("node-a", 1002, 10_000.0);
    assert_eq!(gate.submit(&bogus).await, ValidationOutcome::AnomalyRejected);

    // ...and the same fingerprint is not consumed by it.
    let corrected = Reading::new("node-a", 1002, 410.0);
    assert_eq!(gate.submit(&corrected).await, ValidationOutcome::Accepted);
}

#[tokio::test]
async fn test_forwarding_failure_does_not_commit() {
    let forwarder = Arc::new(StubForwarder::unavailable());
    let gate = pipeline(Arc::clone(&forwarder) as Arc<dyn Forwarder>, GateConfig::default());
    let reading = Reading::new("node-b", 2000, 300.0);

    assert_eq!(
        gate.submit(&reading).await,
        ValidationOutcome::ForwardingFailed {
            fault: ForwardingFault::Unavailable
        }
    );
    assert!(!gate.guard().is_committed(&reading.fingerprint()));

    // Settlement recovers; the very same request now settles.
    forwarder.set_accepting();
    assert_eq!(gate.submit(&reading).await, ValidationOutcome::Accepted);
    assert!(gate.guard().is_committed(&reading.fingerprint()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_forward_once() {
    // A latency window in the forwarder keeps the winning submission in
    // flight while the others race the admission check.
    let forwarder = Arc::new(StubForwarder::accepting().with_delay(Duration::from_millis(30)));
    let gate = pipeline(Arc::clone(&forwarder) as Arc<dyn Forwarder>, GateConfig::default());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.submit(&Reading::new("node-a", 1000, 250.0)).await })
        })
        .collect();

    let mut accepted = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.unwrap() {
            ValidationOutcome::Accepted => accepted += 1,
            ValidationOutcome::DuplicateRejected => duplicates += 1,
            other => panic!("unexpected outcome under contention: {other:?}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(duplicates, 15);
    assert_eq!(forwarder.calls(), 1, "settlement layer must see one call");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_slow_forward_does_not_serialize_others() {
    let forwarder = Arc::new(StubForwarder::accepting().with_delay(Duration::from_millis(100)));
    let gate = pipeline(Arc::clone(&forwarder) as Arc<dyn Forwarder>, GateConfig::default());

    let start = std::time::Instant::now();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.submit(&Reading::new("node-a", 5000 + i, 250.0)).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap(), ValidationOutcome::Accepted);
    }

    // Eight distinct fingerprints, each forwarded with 100ms latency. Run
    // serially that is 800ms; concurrently it stays near one latency. The
    // generous bound only has to rule out global serialization.
    assert!(
        start.elapsed() < Duration::from_millis(500),
        "unrelated fingerprints were serialized: {:?}",
        start.elapsed()
    );
    assert_eq!(forwarder.calls(), 8);
}

#[tokio::test]
async fn test_timeout_is_retryable() {
    let slow = Arc::new(StubForwarder::accepting().with_delay(Duration::from_millis(200)));
    let config = GateConfig::new().with_forward_timeout(Duration::from_millis(20));
    let gate = pipeline(Arc::clone(&slow) as Arc<dyn Forwarder>, config);
    let reading = Reading::new("node-b", 2100, 300.0);

    match gate.submit(&reading).await {
        ValidationOutcome::ForwardingFailed {
            fault: ForwardingFault::TimedOut { .. },
        } => {}
        other => panic!("expected timeout, got {other:?}"),
    }

    // The fingerprint must not be stuck reserved-but-uncommitted.
    assert!(!gate.guard().is_committed(&reading.fingerprint()));
    assert!(gate.guard().try_admit(&reading.fingerprint()));
}

/// A forwarder whose transport always faults; verifies the pipeline
/// translates arbitrary implementations' errors, not just the stub's.
struct BrokenPipe;

#[async_trait::async_trait]
impl Forwarder for BrokenPipe {
    async fn send(&self, _node_id: &str, _energy_wh: f64) -> Result<bool, ForwarderError> {
        Err(ForwarderError::Transport("broken pipe".to_string()))
    }
}

#[tokio::test]
async fn test_transport_fault_from_custom_forwarder() {
    let gate = pipeline(Arc::new(BrokenPipe), GateConfig::default());
    let reading = Reading::new("node-c", 7000, 99.0);

    match gate.submit(&reading).await {
        ValidationOutcome::ForwardingFailed {
            fault: ForwardingFault::Transport { message },
        } => assert!(message.contains("broken pipe")),
        other => panic!("expected transport fault, got {other:?}"),
    }
    assert!(gate.guard().try_admit(&reading.fingerprint()));
}
