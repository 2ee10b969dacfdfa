//! Physical-plausibility threshold strategy.
//!
//! The simplest defensible classifier: a reading is anomalous iff it is not
//! a positive value within the maximum output the sensor class can
//! physically produce. Used for cold start, before enough history exists to
//! fit an outlier model.

use crate::classifier::AnomalyClassifier;
use crate::error::ClassifierError;
use crate::Result;

/// Default plausibility bound for the reference sensor class, in Wh.
///
/// Residential panels in this class peak well under this in any reporting
/// interval; values above it indicate fraud or sensor fault.
pub const DEFAULT_MAX_PLAUSIBLE_WH: f64 = 5_000.0;

/// Flags readings outside the physically plausible band `(0, max]`.
///
/// The upper bound is inclusive: a reading exactly at the maximum is valid.
/// Zero and negative readings are anomalous — a paying settlement layer has
/// no use for them, and negatives only ever come from broken or tampered
/// sensors.
#[derive(Debug, Clone)]
pub struct ThresholdClassifier {
    max_plausible_wh: f64,
}

impl ThresholdClassifier {
    /// Creates a classifier with the given plausibility bound.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::InvalidBound`] if the bound is not a
    /// finite positive number.
    pub fn new(max_plausible_wh: f64) -> Result<Self> {
        if !max_plausible_wh.is_finite() || max_plausible_wh <= 0.0 {
            return Err(ClassifierError::InvalidBound(max_plausible_wh));
        }
        Ok(Self { max_plausible_wh })
    }

    /// The configured plausibility bound in Wh.
    pub fn max_plausible_wh(&self) -> f64 {
        self.max_plausible_wh
    }
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            max_plausible_wh: DEFAULT_MAX_PLAUSIBLE_WH,
        }
    }
}

impl AnomalyClassifier for ThresholdClassifier {
    fn evaluate(&self, energy_wh: f64) -> bool {
        // NaN fails both comparisons below, so test finiteness first.
        if !energy_wh.is_finite() {
            return true;
        }
        energy_wh <= 0.0 || energy_wh > self.max_plausible_wh
    }

    fn strategy(&self) -> &'static str {
        "threshold"
    }
}
