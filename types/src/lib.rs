//! Fundamental types for KYC verification.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the inbound verification request, provider statuses, the final decision record,
//! provider identities and the clock port.

pub mod decision;
pub mod error;
pub mod outcome;
pub mod provider;
pub mod request;
pub mod state;
pub mod time;

pub use decision::{Decision, ReasonCode, Verdict};
pub use error::RequestError;
pub use outcome::{
    AddressOutcome, BiometricOutcome, DocumentOutcome, IdentityCheck, SanctionsOutcome,
};
pub use provider::ProviderKind;
pub use request::VerificationRequest;
pub use state::{SanctionsStatus, VerificationStatus};
pub use time::{Clock, SystemClock};
