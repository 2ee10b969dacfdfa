//! The validation pipeline facade.
//!
//! Orchestrates the replay guard, the anomaly classifier, and the
//! settlement forwarder into one per-reading decision. This is the only
//! place that knows the order of checks and the reservation policy.

use std::sync::Arc;

use tracing::{debug, info, warn};

use wattgate_classifier::{AnomalyClassifier, IsolationForestClassifier, ThresholdClassifier};
use wattgate_replay::ReplayGuard;

use crate::config::GateConfig;
use crate::error::GateError;
use crate::forwarder::Forwarder;
use crate::outcome::{ForwardingFault, ValidationOutcome};
use crate::reading::Reading;

/// The telemetry admission pipeline.
///
/// Per reading: reserve the fingerprint, classify the energy value, forward
/// for settlement under a deadline, and commit the fingerprint only once
/// settlement succeeded. Every non-success path releases the reservation,
/// so the only durable effect of a submission is either a committed
/// fingerprint plus a settled reading, or no state change at all.
///
/// # Concurrency
///
/// `submit` takes `&self`; share the pipeline behind an `Arc` and run any
/// number of submissions concurrently. Per-fingerprint mutual exclusion
/// comes from the guard's atomic reservation: of N racing submissions with
/// one fingerprint, one proceeds and the rest reject as duplicates without
/// ever reaching the forwarder. The guard's lock is never held across the
/// forwarding await, so unrelated fingerprints do not queue behind a slow
/// settlement call.
///
/// All collaborators are injected at construction; the pipeline owns no
/// global state.
pub struct ValidationPipeline {
    classifier: Arc<dyn AnomalyClassifier>,
    guard: Arc<ReplayGuard>,
    forwarder: Arc<dyn Forwarder>,
    config: GateConfig,
}

impl std::fmt::Debug for ValidationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationPipeline")
            .field("strategy", &self.classifier.strategy())
            .finish_non_exhaustive()
    }
}

impl ValidationPipeline {
    /// Creates a pipeline from its injected collaborators.
    ///
    /// The classifier must already be constructed: model loading happens at
    /// startup and its failure is the caller's fatal error, never a
    /// per-request one.
    pub fn new(
        classifier: Arc<dyn AnomalyClassifier>,
        guard: Arc<ReplayGuard>,
        forwarder: Arc<dyn Forwarder>,
        config: GateConfig,
    ) -> Self {
        info!(
            strategy = classifier.strategy(),
            forward_timeout_ms = config.forward_timeout.as_millis() as u64,
            "validation pipeline ready"
        );
        Self {
            classifier,
            guard,
            forwarder,
            config,
        }
    }

    /// Builds the pipeline with a classifier chosen from the configuration:
    /// the learned-model strategy when `model_path` is set, the threshold
    /// strategy otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Classifier`] if the model fails to load or the
    /// plausibility bound is invalid — fatal at startup, the service must
    /// not begin serving. Returns [`GateError::Config`] for a zero
    /// forwarding deadline, which would fail every submission.
    pub fn from_config(
        config: GateConfig,
        guard: Arc<ReplayGuard>,
        forwarder: Arc<dyn Forwarder>,
    ) -> crate::Result<Self> {
        if config.forward_timeout.is_zero() {
            return Err(GateError::Config(
                "forward timeout must be non-zero".to_string(),
            ));
        }
        let classifier: Arc<dyn AnomalyClassifier> = match &config.model_path {
            Some(path) => Arc::new(IsolationForestClassifier::load(path)?),
            None => Arc::new(ThresholdClassifier::new(config.max_plausible_wh)?),
        };
        Ok(Self::new(classifier, guard, forwarder, config))
    }

    /// Validates one reading and, if it passes both filters, settles it.
    ///
    /// Exactly one [`ValidationOutcome`] per call. This method does not
    /// error: filter rejections and settlement faults are outcomes the
    /// caller maps to its own transport status.
    pub async fn submit(&self, reading: &Reading) -> ValidationOutcome {
        let fingerprint = reading.fingerprint();

        // Test-and-reserve in one step; a duplicate does no further work.
        if !self.guard.try_admit(&fingerprint) {
            debug!(%fingerprint, "duplicate submission rejected");
            return ValidationOutcome::DuplicateRejected;
        }

        if self.classifier.evaluate(reading.energy_wh()) {
            warn!(
                %fingerprint,
                energy_wh = reading.energy_wh(),
                strategy = self.classifier.strategy(),
                "anomalous reading rejected"
            );
            // Release, not consume: a corrected value under the same
            // fingerprint must be able to retry.
            self.guard.release(&fingerprint);
            return ValidationOutcome::AnomalyRejected;
        }

        let deadline = self.config.forward_timeout;
        let sent = tokio::time::timeout(
            deadline,
            self.forwarder.send(reading.node_id(), reading.energy_wh()),
        )
        .await;

        match sent {
            Ok(Ok(true)) => {
                // Settlement succeeded; only now does the fingerprint
                // become permanent.
                self.guard.commit(&fingerprint);
                info!(%fingerprint, energy_wh = reading.energy_wh(), "reading settled");
                ValidationOutcome::Accepted
            }
            Ok(Ok(false)) => {
                warn!(%fingerprint, "settlement layer unavailable");
                self.guard.release(&fingerprint);
                ValidationOutcome::ForwardingFailed {
                    fault: ForwardingFault::Unavailable,
                }
            }
            Ok(Err(err)) => {
                warn!(%fingerprint, error = %err, "settlement transport fault");
                self.guard.release(&fingerprint);
                ValidationOutcome::ForwardingFailed {
                    fault: ForwardingFault::Transport {
                        message: err.to_string(),
                    },
                }
            }
            Err(_) => {
                let deadline_ms = deadline.as_millis() as u64;
                warn!(%fingerprint, deadline_ms, "settlement call timed out");
                self.guard.release(&fingerprint);
                ValidationOutcome::ForwardingFailed {
                    fault: ForwardingFault::TimedOut { deadline_ms },
                }
            }
        }
    }

    /// The injected replay guard, for observability and tests.
    pub fn guard(&self) -> &ReplayGuard {
        &self.guard
    }

    /// The active configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}
