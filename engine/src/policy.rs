//! Decision policy: four provider outcomes in, one verdict out.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! 1. sanctions hit → `REJECTED` / `SANCTIONS_HIT`
//! 2. any identity check failed → `MANUAL_REVIEW` / `FAIL`
//! 3. any identity check needs review, or is absent → `MANUAL_REVIEW` / `MANUAL`
//! 4. any identity confidence below the threshold → `MANUAL_REVIEW` / `LOW_CONFIDENCE`
//! 5. otherwise → `APPROVED` / `OK`
//!
//! The identity checks are document, biometric and address. Sanctions only
//! takes part in rule 1; an absent sanctions outcome is not a hit.

use kyc_types::{
    AddressOutcome, BiometricOutcome, DocumentOutcome, IdentityCheck, ReasonCode,
    SanctionsOutcome, Verdict,
};
use std::sync::Arc;

use crate::config::DecisionConfig;
use crate::metrics::KycMetrics;

pub struct DecisionPolicy {
    /// Minimum passing confidence, inclusive.
    threshold: u8,
    metrics: Arc<KycMetrics>,
}

impl DecisionPolicy {
    pub fn new(threshold: u8, metrics: Arc<KycMetrics>) -> Self {
        Self { threshold, metrics }
    }

    pub fn from_config(config: &DecisionConfig, metrics: Arc<KycMetrics>) -> Self {
        Self::new(config.confidence_threshold, metrics)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Reduce the outcomes to a verdict and count it.
    ///
    /// Performs no I/O; the only side effects are the two decision counters
    /// and the log events.
    pub fn decide(
        &self,
        document: Option<&DocumentOutcome>,
        biometric: Option<&BiometricOutcome>,
        address: Option<&AddressOutcome>,
        sanctions: Option<&SanctionsOutcome>,
    ) -> (Verdict, ReasonCode) {
        tracing::info!(
            document = label(document),
            biometric = label(biometric),
            address = label(address),
            sanctions = sanctions.map_or("ABSENT", |s| s.status.as_str()),
            threshold = self.threshold,
            "decision_input"
        );

        let identity: [Option<&dyn IdentityCheck>; 3] = [
            document.map(|o| o as &dyn IdentityCheck),
            biometric.map(|o| o as &dyn IdentityCheck),
            address.map(|o| o as &dyn IdentityCheck),
        ];
        let (verdict, reason) = evaluate(self.threshold, &identity, sanctions);

        tracing::info!(verdict = %verdict, reason = %reason, "decision_output");
        self.metrics.record_decision(verdict, reason);
        (verdict, reason)
    }
}

fn evaluate(
    threshold: u8,
    identity: &[Option<&dyn IdentityCheck>],
    sanctions: Option<&SanctionsOutcome>,
) -> (Verdict, ReasonCode) {
    if sanctions.is_some_and(|s| s.status.is_hit()) {
        return (Verdict::Rejected, ReasonCode::SanctionsHit);
    }
    if identity.iter().flatten().any(|c| c.status().is_fail()) {
        return (Verdict::ManualReview, ReasonCode::Fail);
    }
    if identity
        .iter()
        .any(|c| c.map_or(true, |c| c.status().is_manual_review()))
    {
        return (Verdict::ManualReview, ReasonCode::Manual);
    }
    if identity.iter().flatten().any(|c| c.confidence() < threshold) {
        return (Verdict::ManualReview, ReasonCode::LowConfidence);
    }
    (Verdict::Approved, ReasonCode::Ok)
}

fn label<C: IdentityCheck>(check: Option<&C>) -> &'static str {
    check.map_or("ABSENT", |c| c.status().as_str())
}
