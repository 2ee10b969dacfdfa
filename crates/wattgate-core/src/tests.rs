//! Unit tests for wattgate-core.

#[test]
fn test_crate_structure() {
    // Smoke test - verifies the module structure compiles
    use crate::{ForwardingFault, GateConfig, ValidationOutcome};

    let _config = GateConfig::default();
    let _outcome = ValidationOutcome::Accepted;
    let _fault = ForwardingFault::TimedOut { deadline_ms: 10 };
}
