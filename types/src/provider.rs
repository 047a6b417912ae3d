//! Provider identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one of the four external verification providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Identity document authenticity.
    Document,
    /// Selfie against ID photo face match.
    Biometric,
    /// Proof of address.
    Address,
    /// Sanctions and watch-list screening.
    Sanctions,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        Self::Document,
        Self::Biometric,
        Self::Address,
        Self::Sanctions,
    ];

    /// Default request path on the provider's base URL.
    pub fn default_path(&self) -> &'static str {
        match self {
            Self::Document => "/api/v1/verify-document",
            Self::Biometric => "/api/v1/face-match",
            Self::Address => "/api/v1/verify-address",
            Self::Sanctions => "/api/v1/check-sanctions",
        }
    }

    /// Human-readable name, also used as a metrics label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Biometric => "biometric",
            Self::Address => "address",
            Self::Sanctions => "sanctions",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
