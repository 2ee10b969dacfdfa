//! # Anomaly Classifier
//!
//! Decides whether a reported energy reading is plausible for its sensor
//! class. Defends against fraudulent over-reporting and broken sensors.
//!
//! ## Threat Model
//!
//! Reporting nodes are paid per reported watt-hour and are therefore
//! economically incentivized to misreport:
//!
//! - **Inflated output**: a node claims more energy than its hardware can
//!   physically produce.
//! - **Garbage telemetry**: a faulty or tampered sensor emits negative,
//!   zero, NaN, or infinite values.
//! - **Distribution drift abuse**: readings that are individually plausible
//!   but statistically inconsistent with the fitted historical distribution.
//!
//! The first two are caught by the [`ThresholdClassifier`]; the third needs
//! the fitted [`IsolationForestClassifier`].
//!
//! ## Strategies
//!
//! | Strategy | Basis | When to use |
//! |----------|-------|-------------|
//! | [`ThresholdClassifier`] | Physical plausibility bound | Cold start, no history |
//! | [`IsolationForestClassifier`] | Fitted outlier model | Enough history exists |
//!
//! Both implement [`AnomalyClassifier`], so the validation pipeline can swap
//! strategies without any change to its own logic.
//!
//! ## Contract
//!
//! `evaluate` is pure and deterministic for a fixed model, accepts any `f64`
//! without panicking, and classifies NaN and ±∞ as anomalous rather than
//! surfacing them as errors. Model state is immutable after construction;
//! a failed model load is a fatal startup error ([`ClassifierError`]), never
//! a per-request one.

mod classifier;
mod error;
mod forest;
mod threshold;

pub use classifier::AnomalyClassifier;
pub use error::ClassifierError;
pub use forest::{ForestModel, IsolationForestClassifier, IsolationTree, TreeNode};
pub use threshold::{ThresholdClassifier, DEFAULT_MAX_PLAUSIBLE_WH};

/// Result type for classifier construction and model loading.
pub type Result<T> = std::result::Result<T, ClassifierError>;
