//! The classifier trait shared by all anomaly-detection strategies.

/// A pure decision function over a single energy reading.
///
/// Implementations must be deterministic for a fixed internal model state
/// and must never panic or error for any `f64` input: non-finite values
/// (NaN, ±∞) classify as anomalous.
///
/// Classifier state is read-only after construction, so implementations are
/// `Send + Sync` and can be shared across concurrent submissions without
/// locking.
pub trait AnomalyClassifier: Send + Sync {
    /// Returns `true` iff the reading is anomalous for this sensor class.
    fn evaluate(&self, energy_wh: f64) -> bool;

    /// Short human-readable name of the active strategy, for startup logs.
    fn strategy(&self) -> &'static str;
}
