//! HTTP boundary contract for `POST /validate-data/`.
//!
//! The transport framework itself is an external collaborator; this module
//! fixes only the wire contract it must speak: the request body, the
//! response bodies, and the outcome-to-status mapping.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | Accepted | 200 |
//! | DuplicateRejected | 409 |
//! | AnomalyRejected | 400 |
//! | ForwardingFailed (unavailable) | 503 |
//! | ForwardingFailed (transport, timeout) | 500 |

use serde::{Deserialize, Serialize};

use crate::outcome::{ForwardingFault, ValidationOutcome};
use crate::reading::Reading;

/// Body of `POST /validate-data/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    /// The unique identifier of the reporting node.
    pub node_id: String,
    /// The Unix timestamp of the reading.
    pub timestamp: i64,
    /// Energy produced in watt-hours. Expected positive; non-positive
    /// values are admitted into the pipeline and rejected by the anomaly
    /// filter with a 400.
    pub energy_production_wh: f64,
}

impl From<ValidateRequest> for Reading {
    fn from(request: ValidateRequest) -> Self {
        Reading::new(
            request.node_id,
            request.timestamp,
            request.energy_production_wh,
        )
    }
}

/// Success body: `{"status":"success","message":...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Always `"success"` on the 200 path.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl ValidateResponse {
    /// The canonical acceptance body.
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: "Data validated and forwarded to settlement layer".to_string(),
        }
    }
}

/// Error body carried on every non-200 status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Names the rejection or the underlying fault.
    pub detail: String,
}

/// Maps an outcome to its HTTP status code.
pub fn status_code(outcome: &ValidationOutcome) -> u16 {
    match outcome {
        ValidationOutcome::Accepted => 200,
        ValidationOutcome::DuplicateRejected => 409,
        ValidationOutcome::AnomalyRejected => 400,
        ValidationOutcome::ForwardingFailed {
            fault: ForwardingFault::Unavailable,
        } => 503,
        ValidationOutcome::ForwardingFailed { .. } => 500,
    }
}

/// Serializes the response body for an outcome.
///
/// 200 carries a [`ValidateResponse`]; everything else an [`ErrorDetail`]
/// whose text names the rejection or, for 500s, the underlying transport
/// fault.
pub fn response_body(outcome: &ValidationOutcome) -> serde_json::Value {
    match outcome {
        ValidationOutcome::Accepted => {
            serde_json::json!(ValidateResponse::success())
        }
        other => serde_json::json!(ErrorDetail {
            detail: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_code(&ValidationOutcome::Accepted), 200);
        assert_eq!(status_code(&ValidationOutcome::DuplicateRejected), 409);
        assert_eq!(status_code(&ValidationOutcome::AnomalyRejected), 400);
        assert_eq!(
            status_code(&ValidationOutcome::ForwardingFailed {
                fault: ForwardingFault::Unavailable
            }),
            503
        );
        assert_eq!(
            status_code(&ValidationOutcome::ForwardingFailed {
                fault: ForwardingFault::Transport {
                    message: "reset".to_string()
                }
            }),
            500
        );
        assert_eq!(
            status_code(&ValidationOutcome::ForwardingFailed {
                fault: ForwardingFault::TimedOut { deadline_ms: 10 }
            }),
            500
        );
    }

    #[test]
    fn test_success_body_shape() {
        let body = response_body(&ValidationOutcome::Accepted);
        assert_eq!(body["status"], "success");
        assert!(body["message"].is_string());
    }

    #[test]
    fn test_error_body_names_transport_fault() {
        let outcome = ValidationOutcome::ForwardingFailed {
            fault: ForwardingFault::Transport {
                message: "connection refused".to_string(),
            },
        };
        let body = response_body(&outcome);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }

    #[test]
    fn test_request_deserializes_wire_names() {
        let json = r#"{"node_id":"node-a","timestamp":1000,"energy_production_wh":250.0}"#;
        let request: ValidateRequest = serde_json::from_str(json).unwrap();
        let reading = Reading::from(request);
        assert_eq!(reading.node_id(), "node-a");
        assert_eq!(reading.timestamp(), 1000);
        assert_eq!(reading.energy_wh(), 250.0);
    }
}
