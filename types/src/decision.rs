//! The final decision record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AddressOutcome, BiometricOutcome, DocumentOutcome, SanctionsOutcome};

/// Final decision category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Approved,
    Rejected,
    ManualReview,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::ManualReview => "MANUAL_REVIEW",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable reason for a verdict, one per decision rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    /// Sanctions screening reported a hit.
    SanctionsHit,
    /// A document, biometric or address check failed.
    Fail,
    /// A document, biometric or address check needs manual review (or is absent).
    Manual,
    /// A check passed with confidence below the configured threshold.
    LowConfidence,
    /// Everything passed.
    Ok,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SanctionsHit => "SANCTIONS_HIT",
            Self::Fail => "FAIL",
            Self::Manual => "MANUAL",
            Self::LowConfidence => "LOW_CONFIDENCE",
            Self::Ok => "OK",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of one verification: verdict, reason, the four raw provider
/// outcomes kept for audit, and the time the decision was taken.
///
/// An outcome is `None` only when its gateway task died before resolving.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    pub reason: ReasonCode,
    pub document: Option<DocumentOutcome>,
    pub biometric: Option<BiometricOutcome>,
    pub address: Option<AddressOutcome>,
    pub sanctions: Option<SanctionsOutcome>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SanctionsStatus, VerificationStatus};
    use chrono::TimeZone;

    #[test]
    fn decision_serializes_absent_outcomes_as_null() {
        let decision = Decision {
            verdict: Verdict::ManualReview,
            reason: ReasonCode::Manual,
            document: Some(DocumentOutcome::bare(VerificationStatus::Pass)),
            biometric: None,
            address: None,
            sanctions: Some(SanctionsOutcome::bare(SanctionsStatus::Clear)),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["verdict"], "MANUAL_REVIEW");
        assert_eq!(json["reason"], "MANUAL");
        assert!(json["biometric"].is_null());
        assert_eq!(json["sanctions"]["status"], "CLEAR");
        assert_eq!(json["timestamp"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn reason_codes_display_as_wire_names() {
        assert_eq!(ReasonCode::LowConfidence.to_string(), "LOW_CONFIDENCE");
        assert_eq!(Verdict::Approved.to_string(), "APPROVED");
    }
}
