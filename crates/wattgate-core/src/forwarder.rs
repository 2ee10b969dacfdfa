//! The settlement-layer forwarding capability.
//!
//! The actual settlement mechanics (oracle bridge, chain transaction) live
//! behind this boundary and are somebody else's problem; the pipeline only
//! needs a capability it can await, time-bound, and trust to report faults
//! explicitly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

/// A transport-level fault while contacting the settlement layer.
///
/// Implementations must translate every underlying network fault into this
/// error; nothing may be thrown silently past the pipeline.
#[derive(Debug, Error)]
pub enum ForwarderError {
    /// The request could not be delivered or the response could not be
    /// read.
    #[error("transport fault: {0}")]
    Transport(String),
}

/// Capability to push an accepted reading to the external settlement layer.
///
/// `Ok(true)` means the settlement layer accepted the reading, `Ok(false)`
/// is a definitive unavailability signal, and `Err` is a transport fault.
/// The pipeline wraps every call in a timeout; implementations do not need
/// their own deadline handling.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Forwards a node's energy figure for settlement.
    async fn send(&self, node_id: &str, energy_wh: f64) -> Result<bool, ForwarderError>;
}

/// What a [`StubForwarder`] does with each call.
#[derive(Debug, Clone)]
enum StubBehavior {
    Accept,
    Unavailable,
    Fail(String),
}

/// In-process stand-in for the settlement layer.
///
/// Used by the CLI simulate command and by tests: behavior is switchable at
/// runtime (for unavailable-then-healthy retry scenarios), calls are
/// counted (for at-most-once assertions), and an artificial latency can be
/// added (for timeout scenarios).
pub struct StubForwarder {
    behavior: Mutex<StubBehavior>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StubForwarder {
    /// A stub that accepts every reading.
    pub fn accepting() -> Self {
        Self::with_behavior(StubBehavior::Accept)
    }

    /// A stub that reports the settlement layer as unavailable.
    pub fn unavailable() -> Self {
        Self::with_behavior(StubBehavior::Unavailable)
    }

    /// A stub that fails every call with a transport fault.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(StubBehavior::Fail(message.into()))
    }

    fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Adds artificial latency before each call resolves.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Switches the stub to accepting; models the settlement layer
    /// recovering.
    pub fn set_accepting(&self) {
        *self.lock() = StubBehavior::Accept;
    }

    /// Switches the stub to unavailable; models an outage.
    pub fn set_unavailable(&self) {
        *self.lock() = StubBehavior::Unavailable;
    }

    /// Number of `send` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubBehavior> {
        self.behavior.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Forwarder for StubForwarder {
    async fn send(&self, node_id: &str, energy_wh: f64) -> Result<bool, ForwarderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let behavior = self.lock().clone();
        match behavior {
            StubBehavior::Accept => {
                info!(node_id, energy_wh, "stub forwarder settled reading");
                Ok(true)
            }
            StubBehavior::Unavailable => Ok(false),
            StubBehavior::Fail(message) => Err(ForwarderError::Transport(message)),
        }
    }
}
