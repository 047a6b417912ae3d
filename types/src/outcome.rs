//! Normalized provider outcomes.
//!
//! One value per provider call; never mutated after creation. The same types
//! double as the providers' JSON response bodies.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::{SanctionsStatus, VerificationStatus};

/// Status and confidence of a document, biometric or address check.
///
/// The decision policy only looks at these two fields.
pub trait IdentityCheck {
    fn status(&self) -> VerificationStatus;
    fn confidence(&self) -> u8;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentOutcome {
    pub status: VerificationStatus,
    /// 0-100.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    #[serde(default)]
    pub reasons: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricOutcome {
    pub status: VerificationStatus,
    /// 0-100.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    #[serde(default)]
    pub similarity_score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressOutcome {
    pub status: VerificationStatus,
    /// 0-100.
    #[serde(deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    #[serde(default)]
    pub reasons: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionsOutcome {
    pub status: SanctionsStatus,
    #[serde(default, deserialize_with = "deserialize_confidence")]
    pub confidence: u8,
    #[serde(default)]
    pub match_count: u32,
    #[serde(default)]
    pub matches: Option<Vec<serde_json::Value>>,
}

/// Providers may report confidence as a JSON float. Fractions are truncated
/// and anything above 100 is capped; negative values are malformed.
fn deserialize_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value < 0.0 {
        return Err(de::Error::invalid_value(
            de::Unexpected::Float(value),
            &"a confidence between 0 and 100",
        ));
    }
    Ok(value.min(100.0) as u8)
}

impl DocumentOutcome {
    /// Outcome with no auxiliary data, used for local fallbacks.
    pub fn bare(status: VerificationStatus) -> Self {
        Self {
            status,
            confidence: 0,
            reasons: None,
        }
    }
}

impl BiometricOutcome {
    pub fn bare(status: VerificationStatus) -> Self {
        Self {
            status,
            confidence: 0,
            similarity_score: None,
        }
    }
}

impl AddressOutcome {
    pub fn bare(status: VerificationStatus) -> Self {
        Self {
            status,
            confidence: 0,
            reasons: None,
        }
    }
}

impl SanctionsOutcome {
    pub fn bare(status: SanctionsStatus) -> Self {
        Self {
            status,
            confidence: 0,
            match_count: 0,
            matches: None,
        }
    }
}

macro_rules! impl_identity_check {
    ($($ty:ty),*) => {
        $(
            impl IdentityCheck for $ty {
                fn status(&self) -> VerificationStatus {
                    self.status
                }

                fn confidence(&self) -> u8 {
                    self.confidence
                }
            }
        )*
    };
}

impl_identity_check!(DocumentOutcome, BiometricOutcome, AddressOutcome);
