//! # WattGate Core
//!
//! Admission gatekeeper for energy telemetry from untrusted reporting
//! nodes. Decides whether each reading may be forwarded to the external
//! settlement layer that pays nodes for reported output.
//!
//! ## Threat Coverage
//!
//! Every reading must pass two independent filters before any money moves:
//!
//! | Filter | Component | Threats Blocked |
//! |--------|-----------|-----------------|
//! | Replay | Replay Guard | Double-payment, concurrent double-submit |
//! | Anomaly | Anomaly Classifier | Inflated output, sensor garbage |
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        WATTGATE CORE                           │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │                  ┌──────────────────────┐                      │
//! │   reading ─────► │  ValidationPipeline  │ ──► outcome          │
//! │                  └──────────┬───────────┘                      │
//! │                             │                                  │
//! │        ┌────────────────────┼────────────────────┐             │
//! │        ▼                    ▼                    ▼             │
//! │ ┌─────────────┐     ┌─────────────┐      ┌─────────────┐       │
//! │ │   Replay    │     │   Anomaly   │      │  Forwarder  │       │
//! │ │   Guard     │     │ Classifier  │      │ (settlement)│       │
//! │ └─────────────┘     └─────────────┘      └─────────────┘       │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wattgate_core::{GateConfig, ValidationPipeline, Reading};
//! use wattgate_classifier::ThresholdClassifier;
//! use wattgate_replay::ReplayGuard;
//!
//! let pipeline = ValidationPipeline::new(
//!     Arc::new(ThresholdClassifier::default()),
//!     Arc::new(ReplayGuard::new()),
//!     forwarder,
//!     GateConfig::default(),
//! );
//!
//! let outcome = pipeline.submit(&Reading::new("node-a", 1000, 250.0)).await;
//! if outcome.is_accepted() {
//!     // reading settled, fingerprint committed
//! }
//! ```
//!
//! ## Guarantees
//!
//! - A fingerprint is committed iff its reading was successfully forwarded;
//!   every other path releases the reservation.
//! - At most one forwarding call per fingerprint per committed outcome,
//!   even under concurrent submission.
//! - The forwarding call is bounded by a timeout; a timeout never leaves a
//!   fingerprint permanently reserved.
//! - Unrelated fingerprints never serialize behind one slow forward.

mod config;
mod error;
mod forwarder;
pub mod http;
mod outcome;
mod pipeline;
mod reading;

pub use config::GateConfig;
pub use error::GateError;
pub use forwarder::{Forwarder, ForwarderError, StubForwarder};
pub use outcome::{ForwardingFault, ValidationOutcome};
pub use pipeline::ValidationPipeline;
pub use reading::Reading;

// Re-export component types for convenience
pub use wattgate_classifier::{
    AnomalyClassifier, ClassifierError, IsolationForestClassifier, ThresholdClassifier,
};
pub use wattgate_replay::{Fingerprint, ReplayGuard};

/// Core result type for gate setup operations.
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests;
