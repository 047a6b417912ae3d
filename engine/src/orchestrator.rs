//! Fan-out / fan-in of one verification across the four providers.

use kyc_providers::{
    AddressPayload, AddressProvider, BiometricPayload, BiometricProvider, DocumentPayload,
    DocumentProvider, HttpTransport, Provider, ProviderTransport, SanctionsPayload,
    SanctionsProvider,
};
use kyc_types::{Clock, Decision, ProviderKind, SystemClock, VerificationRequest};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::{KycConfig, ProvidersConfig};
use crate::error::EngineError;
use crate::gateway::ProviderGateway;
use crate::metrics::KycMetrics;
use crate::policy::DecisionPolicy;
use crate::rate_limiter::RateLimiter;
use crate::retry::RetryPolicy;
use crate::tracing_spans::verify_span;

/// The wire ports of the four providers.
#[derive(Clone)]
pub struct ProviderTransports {
    pub document: Arc<dyn ProviderTransport>,
    pub biometric: Arc<dyn ProviderTransport>,
    pub address: Arc<dyn ProviderTransport>,
    pub sanctions: Arc<dyn ProviderTransport>,
}

impl ProviderTransports {
    /// HTTP transports for the configured endpoints, sharing one client.
    pub fn http(config: &ProvidersConfig) -> Result<Self, EngineError> {
        let client = HttpTransport::client()?;
        let build = |kind: ProviderKind| -> Result<Arc<dyn ProviderTransport>, EngineError> {
            let endpoint = config.endpoint(kind);
            let transport =
                HttpTransport::with_client(client.clone(), &endpoint.base_url, endpoint.path_for(kind));
            tracing::debug!(provider = %kind, url = transport.url(), "provider endpoint");
            Ok(Arc::new(transport))
        };
        Ok(Self {
            document: build(ProviderKind::Document)?,
            biometric: build(ProviderKind::Biometric)?,
            address: build(ProviderKind::Address)?,
            sanctions: build(ProviderKind::Sanctions)?,
        })
    }
}

pub struct VerificationOrchestrator {
    document: Arc<ProviderGateway<DocumentProvider>>,
    biometric: Arc<ProviderGateway<BiometricProvider>>,
    address: Arc<ProviderGateway<AddressProvider>>,
    sanctions: Arc<ProviderGateway<SanctionsProvider>>,
    policy: DecisionPolicy,
    metrics: Arc<KycMetrics>,
    clock: Arc<dyn Clock>,
}

impl VerificationOrchestrator {
    /// Wire the gateways, the shared rate limiter and the policy.
    ///
    /// All four gateways draw from one rate limiter.
    pub fn new(
        config: &KycConfig,
        transports: ProviderTransports,
        clock: Arc<dyn Clock>,
        metrics: Arc<KycMetrics>,
    ) -> Self {
        let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit, clock.clone()));
        let retry = RetryPolicy::from_config(&config.retry);

        let gateway = GatewayParts {
            config,
            limiter: &limiter,
            retry,
            metrics: &metrics,
        };

        Self {
            document: gateway.build(transports.document),
            biometric: gateway.build(transports.biometric),
            address: gateway.build(transports.address),
            sanctions: gateway.build(transports.sanctions),
            policy: DecisionPolicy::from_config(&config.decision, metrics.clone()),
            metrics,
            clock,
        }
    }

    /// Production wiring: HTTP transports, the system clock, fresh metrics.
    pub fn from_config(config: &KycConfig) -> Result<Self, EngineError> {
        let transports = ProviderTransports::http(&config.providers)?;
        Ok(Self::new(
            config,
            transports,
            Arc::new(SystemClock::new()),
            Arc::new(KycMetrics::new()),
        ))
    }

    pub fn metrics(&self) -> &Arc<KycMetrics> {
        &self.metrics
    }

    /// Run all four checks concurrently and decide.
    ///
    /// Only an invalid request is an error. Provider trouble always ends in a
    /// decision: gateways fall back on their own, and a gateway task that dies
    /// leaves its outcome absent.
    pub async fn verify(&self, request: &VerificationRequest) -> Result<Decision, EngineError> {
        request.validate()?;
        self.run(request)
            .instrument(verify_span(&request.customer_id))
            .await
    }

    async fn run(&self, request: &VerificationRequest) -> Result<Decision, EngineError> {
        let started = self.clock.now();
        tracing::info!(
            customer_id = %request.customer_id,
            nationality = %request.nationality,
            document_type = %request.document_type,
            "kyc_request"
        );

        let document = dispatch(&self.document, DocumentPayload::from(request));
        let biometric = dispatch(&self.biometric, BiometricPayload::from(request));
        let address = dispatch(&self.address, AddressPayload::from(request));
        let sanctions = dispatch(&self.sanctions, SanctionsPayload::from(request));

        let (document, biometric, address, sanctions) = tokio::join!(
            settle(ProviderKind::Document, document),
            settle(ProviderKind::Biometric, biometric),
            settle(ProviderKind::Address, address),
            settle(ProviderKind::Sanctions, sanctions),
        );

        let (verdict, reason) = self.policy.decide(
            document.as_ref(),
            biometric.as_ref(),
            address.as_ref(),
            sanctions.as_ref(),
        );

        let elapsed = self.clock.now().saturating_duration_since(started);
        self.metrics.record_verify_time(elapsed);
        tracing::info!(
            customer_id = %request.customer_id,
            verdict = %verdict,
            reason = %reason,
            total_ms = elapsed.as_millis() as u64,
            "kyc_decision"
        );

        Ok(Decision {
            verdict,
            reason,
            document,
            biometric,
            address,
            sanctions,
            timestamp: self.clock.utc_now(),
        })
    }
}

/// What the four gateways share; only the transport and timeout differ.
struct GatewayParts<'a> {
    config: &'a KycConfig,
    limiter: &'a Arc<RateLimiter>,
    retry: RetryPolicy,
    metrics: &'a Arc<KycMetrics>,
}

impl GatewayParts<'_> {
    fn build<P: Provider>(&self, transport: Arc<dyn ProviderTransport>) -> Arc<ProviderGateway<P>> {
        Arc::new(ProviderGateway::new(
            transport,
            Arc::clone(self.limiter),
            self.retry,
            self.config.providers.endpoint(P::KIND).timeout(),
            Arc::clone(self.metrics),
        ))
    }
}

fn dispatch<P: Provider>(
    gateway: &Arc<ProviderGateway<P>>,
    payload: P::Payload,
) -> JoinHandle<P::Outcome> {
    let gateway = Arc::clone(gateway);
    tokio::spawn(async move { gateway.invoke(&payload).await }.in_current_span())
}

async fn settle<T>(provider: ProviderKind, handle: JoinHandle<T>) -> Option<T> {
    match handle.await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            tracing::error!(
                provider = %provider,
                error = %err,
                "provider task did not complete, outcome treated as absent"
            );
            None
        }
    }
}
