//! Pre-built [`tracing::Span`] constructors for verification operations.
//!
//! Consistent span names and field sets make it easy to correlate the four
//! provider calls of one verification in any tracing backend.

use kyc_types::ProviderKind;
use tracing::{info_span, Span};

/// Span covering one full verification, from request to decision.
pub fn verify_span(customer_id: &str) -> Span {
    info_span!("kyc_verify", customer_id = %customer_id)
}

/// Span covering one gateway call, including its retries.
pub fn gateway_span(provider: ProviderKind) -> Span {
    info_span!("provider_gateway", provider = %provider)
}

/// Span covering a single HTTP route handled by the API server.
pub fn rpc_span(route: &str) -> Span {
    info_span!("rpc", route = %route)
}
