//! External verification providers.
//!
//! Four independent services are consulted for every verification:
//! - **document**: identity document authenticity
//! - **biometric**: selfie against ID photo face match
//! - **address**: proof of address
//! - **sanctions**: sanctions and watch-list screening
//!
//! Each provider is described by a [`Provider`] implementation that fixes its
//! payload and outcome types and its local fallback outcomes. The actual wire
//! call goes through a [`ProviderTransport`]; [`HttpTransport`] is the
//! production implementation, tests plug in the nullable one.

pub mod error;
pub mod http;
pub mod payload;
pub mod provider;
pub mod transport;

pub use error::TransportError;
pub use http::HttpTransport;
pub use payload::{AddressPayload, BiometricPayload, DocumentPayload, SanctionsPayload};
pub use provider::{AddressProvider, BiometricProvider, DocumentProvider, Provider, SanctionsProvider};
pub use transport::ProviderTransport;
