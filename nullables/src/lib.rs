//! Nullable infrastructure for deterministic testing.
//!
//! The engine reaches the outside world through two ports: the [`Clock`] and
//! the [`ProviderTransport`]. This crate provides test-friendly implementations
//! that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.
//!
//! [`Clock`]: kyc_types::Clock
//! [`ProviderTransport`]: kyc_providers::ProviderTransport

pub mod clock;
pub mod transport;

pub use clock::NullClock;
pub use transport::{NullTransport, Reply};
