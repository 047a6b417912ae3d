//! Status enums reported by verification providers.

use serde::{Deserialize, Serialize};

/// Status reported by the document, biometric and address providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// The check passed.
    Pass,
    /// The check failed, either reported by the provider or after transport exhaustion.
    Fail,
    /// The provider could not decide; a human has to look at it.
    ManualReview,
}

impl VerificationStatus {
    pub fn is_fail(&self) -> bool {
        matches!(self, Self::Fail)
    }

    pub fn is_manual_review(&self) -> bool {
        matches!(self, Self::ManualReview)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::ManualReview => "MANUAL_REVIEW",
        }
    }
}

/// Status reported by the sanctions screening provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanctionsStatus {
    /// No match against any sanctions list.
    Clear,
    /// At least one match, or screening could not be completed.
    Hit,
}

impl SanctionsStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "CLEAR",
            Self::Hit => "HIT",
        }
    }
}
