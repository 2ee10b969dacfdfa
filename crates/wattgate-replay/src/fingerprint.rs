//! Submission identity.

use serde::{Deserialize, Serialize};

/// Identity of one submission attempt: the `(node_id, timestamp)` pair.
///
/// Two readings with the same fingerprint are the same submission
/// regardless of their energy values. A broader identity scheme (for
/// example, one that admits corrected values for an already-settled
/// timestamp) is deliberately out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    node_id: String,
    timestamp: i64,
}

impl Fingerprint {
    /// Derives the fingerprint for a node's reading at a timestamp.
    pub fn new(node_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            node_id: node_id.into(),
            timestamp,
        }
    }

    /// The reporting node's opaque identifier.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Unix seconds of the reading.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.node_id, self.timestamp)
    }
}
