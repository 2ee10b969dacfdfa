//! Outcome types for telemetry validation.

use serde::{Deserialize, Serialize};

/// The final outcome of one submission through the validation pipeline.
///
/// Exactly one outcome per submission; a reading is never both accepted and
/// rejected. The two rejections are routine filter decisions reported to
/// the caller, not failures. `ForwardingFailed` is retryable: the
/// fingerprint is released before it is returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    /// Reading passed both filters and was settled; fingerprint committed.
    Accepted,

    /// Fingerprint already reserved or committed. No further work was done.
    DuplicateRejected,

    /// Classifier flagged the reading as implausible. Fingerprint released,
    /// so a corrected resubmission can still get through.
    AnomalyRejected,

    /// The settlement layer could not be reached or refused. Fingerprint
    /// released; the caller may retry the identical request.
    ForwardingFailed {
        /// What went wrong at the settlement boundary.
        fault: ForwardingFault,
    },
}

impl ValidationOutcome {
    /// Returns true iff the reading was settled and committed.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns true for either filter rejection.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::DuplicateRejected | Self::AnomalyRejected)
    }

    /// Returns true iff the caller may retry the identical request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ForwardingFailed { .. })
    }
}

impl std::fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "accepted"),
            Self::DuplicateRejected => write!(f, "duplicate submission"),
            Self::AnomalyRejected => write!(f, "anomaly detected in data"),
            Self::ForwardingFailed { fault } => write!(f, "forwarding failed: {fault}"),
        }
    }
}

/// How the forwarding step failed. All variants leave the fingerprint
/// retryable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForwardingFault {
    /// The settlement layer answered with a definitive unavailability
    /// signal.
    Unavailable,

    /// A transport-level fault occurred on the way to the settlement layer.
    Transport {
        /// Description of the underlying fault, surfaced to the caller.
        message: String,
    },

    /// The forwarding call exceeded the configured deadline.
    TimedOut {
        /// The deadline that was exceeded, in milliseconds.
        deadline_ms: u64,
    },
}

impl std::fmt::Display for ForwardingFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "settlement layer unavailable"),
            Self::Transport { message } => write!(f, "transport fault: {message}"),
            Self::TimedOut { deadline_ms } => {
                write!(f, "settlement call exceeded {deadline_ms}ms deadline")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates_are_exclusive() {
        let outcomes = [
            ValidationOutcome::Accepted,
            ValidationOutcome::DuplicateRejected,
            ValidationOutcome::AnomalyRejected,
            ValidationOutcome::ForwardingFailed {
                fault: ForwardingFault::Unavailable,
            },
        ];
        for outcome in &outcomes {
            let flags = [
                outcome.is_accepted(),
                outcome.is_rejected(),
                outcome.is_retryable(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{outcome:?}");
        }
    }

    #[test]
    fn test_fault_display_names_the_fault() {
        let fault = ForwardingFault::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(fault.to_string(), "transport fault: connection refused");

        let fault = ForwardingFault::TimedOut { deadline_ms: 5000 };
        assert!(fault.to_string().contains("5000ms"));
    }
}
