//! Error types for WattGate Core.
//!
//! These cover setup and boundary faults only. A running pipeline reports
//! per-submission results through [`crate::ValidationOutcome`], which is a
//! value, not an error: duplicate and anomaly rejections are routine filter
//! decisions, and forwarding failures are retryable outcomes.

use thiserror::Error;

/// Core error type for gate setup operations.
#[derive(Debug, Error)]
pub enum GateError {
    /// Classifier could not be constructed or its model could not be
    /// loaded. Fatal at startup: the service must refuse to serve traffic
    /// rather than run without a classifier.
    #[error("classifier initialization failed: {0}")]
    Classifier(#[from] wattgate_classifier::ClassifierError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
