//! Configuration types for the validation pipeline.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the gate.
///
/// Carries only knobs that have a decided policy. Notably absent: any
/// fingerprint TTL or cache bound — whether committed fingerprints should
/// ever expire is an unresolved retention decision, and a fake knob would
/// imply one has been made.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Upper bound of the physically plausible reading band, in Wh.
    /// Consumed by the threshold classifier strategy.
    pub max_plausible_wh: f64,

    /// Deadline for one settlement-layer forwarding call. On expiry the
    /// submission fails retryably and its reservation is released.
    pub forward_timeout: Duration,

    /// Path to a fitted isolation forest model. When set, the pipeline
    /// built by [`ValidationPipeline::from_config`] uses the learned-model
    /// strategy; otherwise it falls back to the threshold strategy.
    ///
    /// [`ValidationPipeline::from_config`]: crate::ValidationPipeline::from_config
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl GateConfig {
    /// Creates a config with default values.
    ///
    /// Defaults:
    /// - Max plausible reading: 5,000 Wh
    /// - Forward timeout: 10 seconds
    pub fn new() -> Self {
        Self {
            max_plausible_wh: wattgate_classifier::DEFAULT_MAX_PLAUSIBLE_WH,
            forward_timeout: Duration::from_secs(10),
            model_path: None,
        }
    }

    /// Sets the plausibility bound.
    #[must_use]
    pub fn with_max_plausible_wh(mut self, max_plausible_wh: f64) -> Self {
        self.max_plausible_wh = max_plausible_wh;
        self
    }

    /// Sets the forwarding deadline.
    #[must_use]
    pub fn with_forward_timeout(mut self, forward_timeout: Duration) -> Self {
        self.forward_timeout = forward_timeout;
        self
    }

    /// Selects the learned-model strategy backed by the given model file.
    #[must_use]
    pub fn with_model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(model_path.into());
        self
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self::new()
    }
}
