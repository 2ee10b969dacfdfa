//! Isolation-forest strategy over a fitted model.
//!
//! Scores a reading by how quickly the forest's trees isolate it: outliers
//! sit in sparse regions of the fitted distribution and reach a leaf in few
//! splits, so short average path lengths map to high anomaly scores.
//!
//! Training happens offline; this module only loads an already-fitted model
//! from a JSON file at startup and scores against it. The loaded model is
//! immutable for the process lifetime.
//!
//! ## Model file format
//!
//! ```json
//! {
//!   "trees": [
//!     { "nodes": [
//!       { "kind": "split", "value": 10000.0, "left": 1, "right": 2 },
//!       { "kind": "leaf", "size": 256 },
//!       { "kind": "leaf", "size": 1 }
//!     ]}
//!   ],
//!   "sample_size": 256,
//!   "threshold": 0.6
//! }
//! ```
//!
//! Each tree stores its nodes in one table; split children must point
//! forward in the table, which rules out cycles during scoring.
//!
//! ## References
//!
//! - Liu, F. T., Ting, K. M., Zhou, Z.-H. (2008). "Isolation Forest"

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::AnomalyClassifier;
use crate::error::ClassifierError;
use crate::Result;

/// Euler–Mascheroni constant, used in the expected-path-length estimate.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// One node of an isolation tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split on the energy value.
    Split {
        /// Readings `< value` descend left, the rest descend right.
        value: f64,
        /// Node-table index of the left child.
        left: usize,
        /// Node-table index of the right child.
        right: usize,
    },
    /// External node holding `size` training samples.
    Leaf {
        /// Number of training samples that ended in this leaf.
        size: usize,
    },
}

/// A single isolation tree, nodes flattened into one table with the root
/// at index 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationTree {
    /// Node table; split children always have larger indices than their
    /// parent.
    pub nodes: Vec<TreeNode>,
}

impl IsolationTree {
    /// Path length from the root to the leaf isolating `value`, adjusted by
    /// the expected subtree depth of the leaf's sample count.
    fn path_length(&self, value: f64) -> f64 {
        let mut index = 0;
        let mut depth = 0.0;
        loop {
            match self.nodes[index] {
                TreeNode::Split { value: split, left, right } => {
                    depth += 1.0;
                    index = if value < split { left } else { right };
                }
                TreeNode::Leaf { size } => {
                    return depth + average_path_length(size);
                }
            }
        }
    }
}

/// A fitted isolation forest, as serialized by the offline trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    /// The fitted trees.
    pub trees: Vec<IsolationTree>,
    /// Sub-sample size each tree was fitted on; normalizes path lengths.
    pub sample_size: usize,
    /// Score threshold in (0, 1) above which a reading is anomalous.
    pub threshold: f64,
}

/// Classifier scoring readings against a fitted [`ForestModel`].
///
/// Construct once at startup via [`load`](Self::load) or
/// [`from_model`](Self::from_model); both validate the model up front so
/// evaluation can never fail. A reading is anomalous iff its anomaly score
/// exceeds the model's threshold. Non-finite readings skip scoring and
/// classify as anomalous directly.
#[derive(Debug)]
pub struct IsolationForestClassifier {
    model: ForestModel,
    /// `c(sample_size)`, precomputed; the score normalizer.
    expected_depth: f64,
}

impl IsolationForestClassifier {
    /// Loads and validates a fitted model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifierError`] if the file cannot be read, does not
    /// parse, or fails model validation. All of these are fatal at startup.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let model: ForestModel = serde_json::from_str(&raw)?;
        let classifier = Self::from_model(model)?;
        info!(
            trees = classifier.model.trees.len(),
            threshold = classifier.model.threshold,
            path = %path.as_ref().display(),
            "isolation forest model loaded"
        );
        Ok(classifier)
    }

    /// Validates an in-memory model and wraps it in a classifier.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifierError`] if the forest is empty, the threshold
    /// or sample size is out of range, or any tree references a node out of
    /// bounds or backwards.
    pub fn from_model(model: ForestModel) -> Result<Self> {
        if model.trees.is_empty() {
            return Err(ClassifierError::EmptyForest);
        }
        if !(model.threshold > 0.0 && model.threshold < 1.0) {
            return Err(ClassifierError::InvalidThreshold(model.threshold));
        }
        if model.sample_size < 2 {
            return Err(ClassifierError::InvalidSampleSize(model.sample_size));
        }
        for (t, tree) in model.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ClassifierError::InvalidTree { tree: t, node: 0 });
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if let TreeNode::Split { left, right, .. } = *node {
                    // Forward-only children make the walk in path_length
                    // terminate; equal or backward indices could loop.
                    let valid = left > n && right > n && left < tree.nodes.len() && right < tree.nodes.len();
                    if !valid {
                        return Err(ClassifierError::InvalidTree { tree: t, node: n });
                    }
                }
            }
        }
        let expected_depth = average_path_length(model.sample_size);
        Ok(Self { model, expected_depth })
    }

    /// Anomaly score for a reading, in [0, 1]; higher is more anomalous.
    ///
    /// Non-finite readings score 1.0.
    pub fn anomaly_score(&self, energy_wh: f64) -> f64 {
        if !energy_wh.is_finite() {
            return 1.0;
        }
        let total: f64 = self
            .model
            .trees
            .iter()
            .map(|tree| tree.path_length(energy_wh))
            .sum();
        let mean_path = total / self.model.trees.len() as f64;
        2f64.powf(-mean_path / self.expected_depth)
    }

    /// The score threshold the model was fitted with.
    pub fn threshold(&self) -> f64 {
        self.model.threshold
    }
}

impl AnomalyClassifier for IsolationForestClassifier {
    fn evaluate(&self, energy_wh: f64) -> bool {
        self.anomaly_score(energy_wh) > self.model.threshold
    }

    fn strategy(&self) -> &'static str {
        "isolation-forest"
    }
}

/// Expected path length `c(n)` of an unsuccessful BST search over `n`
/// samples (Liu et al., eq. 1). Normalizes raw tree depths so scores are
/// comparable across sample sizes.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}
