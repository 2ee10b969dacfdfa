//! Error types for classifier construction and model loading.
//!
//! These errors occur only at startup. A constructed classifier cannot fail
//! at evaluation time; out-of-domain inputs classify as anomalous instead.

use thiserror::Error;

/// Errors raised while constructing a classifier or loading its model.
///
/// Any of these is fatal at startup: the service must refuse to serve
/// traffic rather than run without a classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Model file could not be read.
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    /// Model file is not valid JSON or does not match the model schema.
    #[error("malformed model file: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Model contains no trees and cannot score anything.
    #[error("model contains no trees")]
    EmptyForest,

    /// A tree references a node index outside its node table, or a split
    /// points backwards (which would allow cycles during scoring).
    #[error("tree {tree} has an invalid node reference at index {node}")]
    InvalidTree {
        /// Index of the offending tree within the forest.
        tree: usize,
        /// Index of the offending node within the tree.
        node: usize,
    },

    /// Anomaly threshold is outside the meaningful (0, 1) score range.
    #[error("anomaly threshold {0} is outside (0, 1)")]
    InvalidThreshold(f64),

    /// Sample size must be at least 2 for path-length normalization.
    #[error("sample size {0} is too small to normalize path lengths")]
    InvalidSampleSize(usize),

    /// Plausibility bound must be a finite, positive number of watt-hours.
    #[error("max plausible reading {0} Wh is not a finite positive bound")]
    InvalidBound(f64),
}
