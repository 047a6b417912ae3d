//! Provider gateway: rate limit, retry and timeout around one provider.
//!
//! A gateway never returns an error. Whatever happens on the wire, the caller
//! gets an outcome: the provider's own answer, or one of the two local
//! fallbacks fixed by the [`Provider`] implementation.

use kyc_providers::{Provider, ProviderTransport, TransportError};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;

use crate::metrics::KycMetrics;
use crate::rate_limiter::RateLimiter;
use crate::retry::RetryPolicy;
use crate::tracing_spans::gateway_span;

/// How a gateway call produced its outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The provider answered with a decodable body.
    Response,
    /// The rate limiter refused the call; the provider was not contacted.
    RateLimited,
    /// Every attempt failed at the transport level.
    Unavailable,
}

impl Resolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Response => "response",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
        }
    }
}

pub struct ProviderGateway<P: Provider> {
    transport: Arc<dyn ProviderTransport>,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
    /// Deadline for a single attempt.
    timeout: Duration,
    metrics: Arc<KycMetrics>,
    _provider: PhantomData<fn() -> P>,
}

impl<P: Provider> ProviderGateway<P> {
    pub fn new(
        transport: Arc<dyn ProviderTransport>,
        limiter: Arc<RateLimiter>,
        retry: RetryPolicy,
        timeout: Duration,
        metrics: Arc<KycMetrics>,
    ) -> Self {
        Self {
            transport,
            limiter,
            retry,
            timeout,
            metrics,
            _provider: PhantomData,
        }
    }

    /// Call the provider and return its outcome, or a fallback.
    ///
    /// One rate-limit unit is taken per invocation; retries do not take more.
    pub async fn invoke(&self, payload: &P::Payload) -> P::Outcome {
        let started = Instant::now();
        let (outcome, resolution) = self
            .resolve(payload)
            .instrument(gateway_span(P::KIND))
            .await;
        self.metrics
            .record_provider_call(P::KIND, resolution, started.elapsed());
        outcome
    }

    async fn resolve(&self, payload: &P::Payload) -> (P::Outcome, Resolution) {
        if !self.limiter.try_acquire() {
            tracing::warn!(
                limit = self.limiter.limit(),
                window_ms = self.limiter.window().as_millis() as u64,
                "rate limit exceeded, provider not called"
            );
            return (P::rate_limited(), Resolution::RateLimited);
        }

        let body = match serde_json::to_value(payload) {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, "could not encode provider payload");
                return (P::unavailable(), Resolution::Unavailable);
            }
        };

        match self.retry.run(|_| self.attempt(&body)).await {
            Ok(outcome) => (outcome, Resolution::Response),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    error_kind = err.kind(),
                    "provider unavailable, using fallback outcome"
                );
                (P::unavailable(), Resolution::Unavailable)
            }
        }
    }

    async fn attempt(&self, body: &Value) -> Result<P::Outcome, TransportError> {
        let response = tokio::time::timeout(self.timeout, self.transport.call(body.clone()))
            .await
            .map_err(|_| TransportError::Timeout(self.timeout))??;
        serde_json::from_value(response).map_err(|e| TransportError::Decode(e.to_string()))
    }
}
