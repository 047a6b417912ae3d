//! The wire-call port.

use async_trait::async_trait;
use serde_json::Value;

use crate::TransportError;

/// Performs one request/response exchange with a provider.
///
/// Implementations do not retry and do not enforce the per-attempt deadline;
/// both belong to the gateway wrapping the transport.
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn call(&self, payload: Value) -> Result<Value, TransportError>;
}
