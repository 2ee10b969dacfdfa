//! The telemetry reading value type.

use serde::{Deserialize, Serialize};
use wattgate_replay::Fingerprint;

/// One energy-production reading reported by a node.
///
/// Immutable once constructed. Construction is deliberately permissive
/// about the energy value: plausibility (including zero and negative
/// readings) is the anomaly filter's decision, so a bad value gets a
/// specific rejection instead of failing at the type boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    node_id: String,
    timestamp: i64,
    energy_wh: f64,
}

impl Reading {
    /// Creates a reading for a node at a Unix-seconds timestamp.
    pub fn new(node_id: impl Into<String>, timestamp: i64, energy_wh: f64) -> Self {
        Self {
            node_id: node_id.into(),
            timestamp,
            energy_wh,
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

    /// Reported energy production in watt-hours.
    pub fn energy_wh(&self) -> f64 {
        self.energy_wh
    }

    /// Derives the submission fingerprint: `(node_id, timestamp)`, energy
    /// value excluded.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(self.node_id.clone(), self.timestamp)
    }
}
