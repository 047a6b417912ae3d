//! Provider identities.
//!
//! A gateway is generic over a [`Provider`]: the four implementations here are
//! zero-sized markers fixing the payload type, the outcome type and the two
//! outcomes produced locally when the provider is never reached.

use kyc_types::{
    AddressOutcome, BiometricOutcome, DocumentOutcome, ProviderKind, SanctionsOutcome,
    SanctionsStatus, VerificationStatus,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

use crate::{AddressPayload, BiometricPayload, DocumentPayload, SanctionsPayload};

pub trait Provider: Send + Sync + 'static {
    const KIND: ProviderKind;

    type Payload: Serialize + Send + Sync + 'static;
    type Outcome: DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// Outcome when the shared rate limiter refuses the call.
    fn rate_limited() -> Self::Outcome;

    /// Outcome when every attempt failed at the transport level.
    fn unavailable() -> Self::Outcome;
}

pub struct DocumentProvider;
pub struct BiometricProvider;
pub struct AddressProvider;
pub struct SanctionsProvider;

impl Provider for DocumentProvider {
    const KIND: ProviderKind = ProviderKind::Document;
    type Payload = DocumentPayload;
    type Outcome = DocumentOutcome;

    fn rate_limited() -> DocumentOutcome {
        DocumentOutcome::bare(VerificationStatus::ManualReview)
    }

    fn unavailable() -> DocumentOutcome {
        DocumentOutcome::bare(VerificationStatus::Fail)
    }
}

impl Provider for BiometricProvider {
    const KIND: ProviderKind = ProviderKind::Biometric;
    type Payload = BiometricPayload;
    type Outcome = BiometricOutcome;

    fn rate_limited() -> BiometricOutcome {
        BiometricOutcome::bare(VerificationStatus::ManualReview)
    }

    fn unavailable() -> BiometricOutcome {
        BiometricOutcome::bare(VerificationStatus::Fail)
    }
}

impl Provider for AddressProvider {
    const KIND: ProviderKind = ProviderKind::Address;
    type Payload = AddressPayload;
    type Outcome = AddressOutcome;

    fn rate_limited() -> AddressOutcome {
        AddressOutcome::bare(VerificationStatus::ManualReview)
    }

    fn unavailable() -> AddressOutcome {
        AddressOutcome::bare(VerificationStatus::Fail)
    }
}

/// Sanctions screening fails closed: both local fallbacks report a hit.
impl Provider for SanctionsProvider {
    const KIND: ProviderKind = ProviderKind::Sanctions;
    type Payload = SanctionsPayload;
    type Outcome = SanctionsOutcome;

    fn rate_limited() -> SanctionsOutcome {
        SanctionsOutcome::bare(SanctionsStatus::Hit)
    }

    fn unavailable() -> SanctionsOutcome {
        SanctionsOutcome::bare(SanctionsStatus::Hit)
    }
}
