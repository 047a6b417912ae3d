//! HTTP transport for provider endpoints.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::{ProviderTransport, TransportError};

/// Default connection timeout. The per-attempt deadline is enforced by the gateway.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Posts JSON payloads to one provider endpoint.
///
/// `POST {base_url}{path}` with the payload as body; a 2xx JSON body is the response.
pub struct HttpTransport {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, path: &str) -> Result<Self, TransportError> {
        Ok(Self::with_client(Self::client()?, base_url, path))
    }

    /// Client with the default connect timeout. Clone it into several
    /// transports through [`HttpTransport::with_client`] to share one
    /// connection pool.
    pub fn client() -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))
    }

    pub fn with_client(http_client: reqwest::Client, base_url: &str, path: &str) -> Self {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Self { http_client, url }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProviderTransport for HttpTransport {
    async fn call(&self, payload: Value) -> Result<Value, TransportError> {
        let response = self
            .http_client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(DEFAULT_CONNECT_TIMEOUT)
                } else if e.is_connect() {
                    TransportError::Connect(format!("connection failed: {e}"))
                } else {
                    TransportError::Other(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %self.url, status = status.as_u16(), "provider returned error status");
            return Err(TransportError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(format!("response body is not JSON: {e}")))
    }
}
