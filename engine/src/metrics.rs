//! Prometheus metrics for the verification engine.
//!
//! The [`KycMetrics`] struct owns a dedicated [`Registry`] that the HTTP
//! `/metrics` endpoint encodes into the Prometheus text exposition format.
//! Decision counters are keyed by verdict and by reason code; provider call
//! counters are keyed by provider and by how the gateway resolved.

use kyc_types::{ProviderKind, ReasonCode, Verdict};
use prometheus::{
    register_histogram_vec_with_registry, register_histogram_with_registry,
    register_int_counter_vec_with_registry, Encoder, Histogram, HistogramOpts, HistogramVec,
    IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;

use crate::gateway::Resolution;

/// Central collection of all engine-level Prometheus metrics.
pub struct KycMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Decisions taken, labelled by `result` (the verdict).
    pub decision_total: IntCounterVec,
    /// Decisions taken, labelled by `reason` (the reason code).
    pub decision_reason: IntCounterVec,
    /// Gateway calls, labelled by `provider` and `result`.
    pub provider_calls: IntCounterVec,

    // ── Histograms ──────────────────────────────────────────────────────
    /// End-to-end verification latency, in milliseconds.
    pub verify_time_ms: Histogram,
    /// Gateway latency including retries, in milliseconds, labelled by `provider`.
    pub provider_latency_ms: HistogramVec,
}

impl KycMetrics {
    /// Create a fresh set of metrics, all registered under a new [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let decision_total = register_int_counter_vec_with_registry!(
            Opts::new("kyc_decision_total", "Verification decisions by verdict"),
            &["result"],
            registry
        )
        .expect("failed to register decision_total counter");

        let decision_reason = register_int_counter_vec_with_registry!(
            Opts::new(
                "kyc_decision_reason_total",
                "Verification decisions by reason code"
            ),
            &["reason"],
            registry
        )
        .expect("failed to register decision_reason counter");

        let provider_calls = register_int_counter_vec_with_registry!(
            Opts::new(
                "kyc_provider_calls_total",
                "Provider gateway calls by provider and resolution"
            ),
            &["provider", "result"],
            registry
        )
        .expect("failed to register provider_calls counter");

        // 1 ms → ~16 s.
        let verify_time_ms = register_histogram_with_registry!(
            HistogramOpts::new("kyc_verify_time_ms", "End-to-end verification latency")
                .buckets(prometheus::exponential_buckets(1.0, 2.0, 15).expect("valid buckets")),
            registry
        )
        .expect("failed to register verify_time_ms histogram");

        let provider_latency_ms = register_histogram_vec_with_registry!(
            HistogramOpts::new(
                "kyc_provider_latency_ms",
                "Provider gateway latency including retries"
            )
            .buckets(prometheus::exponential_buckets(1.0, 2.0, 15).expect("valid buckets")),
            &["provider"],
            registry
        )
        .expect("failed to register provider_latency_ms histogram");

        Self {
            registry,
            decision_total,
            decision_reason,
            provider_calls,
            verify_time_ms,
            provider_latency_ms,
        }
    }

    pub fn record_decision(&self, verdict: Verdict, reason: ReasonCode) {
        self.decision_total
            .with_label_values(&[verdict.as_str()])
            .inc();
        self.decision_reason
            .with_label_values(&[reason.as_str()])
            .inc();
    }

    pub fn record_provider_call(
        &self,
        provider: ProviderKind,
        resolution: Resolution,
        elapsed: Duration,
    ) {
        self.provider_calls
            .with_label_values(&[provider.as_str(), resolution.as_str()])
            .inc();
        self.provider_latency_ms
            .with_label_values(&[provider.as_str()])
            .observe(elapsed.as_secs_f64() * 1000.0);
    }

    pub fn record_verify_time(&self, elapsed: Duration) {
        self.verify_time_ms.observe(elapsed.as_secs_f64() * 1000.0);
    }

    /// Render every metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for KycMetrics {
    fn default() -> Self {
        Self::new()
    }
}
