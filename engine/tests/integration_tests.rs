//! End-to-end verification scenarios.
//!
//! These tests wire the orchestrator to nullable transports and a nullable
//! clock, the same way production wires it to HTTP transports and the system
//! clock, and check the decision that comes out.

use std::sync::Arc;
use std::time::Duration;

use kyc_engine::{KycConfig, KycMetrics, ProviderTransports, VerificationOrchestrator};
use kyc_nullables::{NullClock, NullTransport, Reply};
use kyc_providers::TransportError;
use kyc_types::{ReasonCode, SanctionsStatus, Verdict, VerificationRequest, VerificationStatus};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn request(customer_id: &str) -> VerificationRequest {
    serde_json::from_value(json!({
        "customerId": customer_id,
        "fullName": "Grace Hopper",
        "dateOfBirth": "1906-12-09",
        "nationality": "US",
        "documentType": "PASSPORT",
        "documentNumber": "P0000001",
        "documentExpiry": "2031-01-01",
        "selfieUrl": "https://cdn.example/selfie.jpg",
        "idPhotoUrl": "https://cdn.example/id.jpg",
        "address": "1 Navy Yard, Washington DC",
        "proofType": "UTILITY_BILL"
    }))
    .expect("valid request")
}

fn pass(confidence: u8) -> Arc<NullTransport> {
    Arc::new(NullTransport::responding(
        json!({"status": "PASS", "confidence": confidence}),
    ))
}

fn sanctions(status: &str) -> Arc<NullTransport> {
    Arc::new(NullTransport::responding(
        json!({"status": status, "confidence": 99, "matchCount": 0}),
    ))
}

fn down() -> Arc<NullTransport> {
    Arc::new(NullTransport::failing(TransportError::Connect(
        "connection refused".into(),
    )))
}

struct Rig {
    document: Arc<NullTransport>,
    biometric: Arc<NullTransport>,
    address: Arc<NullTransport>,
    sanctions: Arc<NullTransport>,
}

impl Rig {
    fn new(
        document: Arc<NullTransport>,
        biometric: Arc<NullTransport>,
        address: Arc<NullTransport>,
        sanctions: Arc<NullTransport>,
    ) -> Self {
        Self {
            document,
            biometric,
            address,
            sanctions,
        }
    }

    fn healthy() -> Self {
        Self::new(pass(95), pass(92), pass(88), sanctions("CLEAR"))
    }

    fn transports(&self) -> ProviderTransports {
        ProviderTransports {
            document: self.document.clone(),
            biometric: self.biometric.clone(),
            address: self.address.clone(),
            sanctions: self.sanctions.clone(),
        }
    }

    fn total_calls(&self) -> usize {
        self.document.calls() + self.biometric.calls() + self.address.calls() + self.sanctions.calls()
    }

    fn orchestrator(&self, config: &KycConfig, clock: &NullClock) -> VerificationOrchestrator {
        VerificationOrchestrator::new(
            config,
            self.transports(),
            Arc::new(clock.clone()),
            Arc::new(KycMetrics::new()),
        )
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn all_providers_pass_is_approved() {
    let rig = Rig::healthy();
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-1")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::Approved);
    assert_eq!(decision.reason, ReasonCode::Ok);
    assert_eq!(rig.total_calls(), 4);
}

#[tokio::test(start_paused = true)]
async fn sanctions_hit_is_rejected_whatever_the_rest_says() {
    let rig = Rig::new(pass(100), pass(100), pass(100), sanctions("HIT"));
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-2")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::Rejected);
    assert_eq!(decision.reason, ReasonCode::SanctionsHit);
    assert_eq!(
        decision.document.as_ref().map(|d| d.confidence),
        Some(100),
        "raw outcomes are kept for audit"
    );
}

#[tokio::test(start_paused = true)]
async fn one_low_confidence_check_needs_review() {
    let rig = Rig::new(pass(90), pass(90), pass(79), sanctions("CLEAR"));
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-3")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::ManualReview);
    assert_eq!(decision.reason, ReasonCode::LowConfidence);
}

#[tokio::test(start_paused = true)]
async fn shared_limit_of_one_lets_a_single_call_through() {
    let rig = Rig::healthy();
    let mut config = KycConfig::default();
    config.rate_limit.limit = 1;
    config.rate_limit.window_ms = 60_000;
    let orch = rig.orchestrator(&config, &NullClock::new());

    let (a, b) = (request("cust-a"), request("cust-b"));
    let (first, second) = tokio::join!(orch.verify(&a), orch.verify(&b));
    let decisions = [first.expect("decision"), second.expect("decision")];

    // one budget for all four providers and both requests
    assert_eq!(rig.total_calls(), 1);
    assert_eq!(
        orch.metrics()
            .provider_calls
            .with_label_values(&["document", "rate_limited"])
            .get()
            + orch
                .metrics()
                .provider_calls
                .with_label_values(&["document", "response"])
                .get(),
        2
    );

    // for every provider, at least one of the two calls was refused
    let refused_identity = |status: Option<(VerificationStatus, u8)>| {
        status == Some((VerificationStatus::ManualReview, 0))
    };
    assert!(decisions
        .iter()
        .any(|d| refused_identity(d.document.as_ref().map(|o| (o.status, o.confidence)))));
    assert!(decisions
        .iter()
        .any(|d| refused_identity(d.biometric.as_ref().map(|o| (o.status, o.confidence)))));
    assert!(decisions
        .iter()
        .any(|d| refused_identity(d.address.as_ref().map(|o| (o.status, o.confidence)))));
    assert!(decisions.iter().any(|d| d
        .sanctions
        .as_ref()
        .is_some_and(|s| s.status == SanctionsStatus::Hit && s.confidence == 0)));

    // a refused sanctions screen fails closed
    assert!(decisions.iter().any(|d| d.verdict == Verdict::Rejected));
    assert!(decisions.iter().all(|d| d.verdict != Verdict::Approved));
}

#[tokio::test(start_paused = true)]
async fn budget_returns_after_the_window() {
    let rig = Rig::healthy();
    let mut config = KycConfig::default();
    config.rate_limit.limit = 4;
    config.rate_limit.window_ms = 1_000;
    let clock = NullClock::new();
    let orch = rig.orchestrator(&config, &clock);

    let first = orch.verify(&request("cust-1")).await.expect("decision");
    assert_eq!(first.verdict, Verdict::Approved);

    let second = orch.verify(&request("cust-2")).await.expect("decision");
    assert_eq!(second.verdict, Verdict::Rejected);
    assert_eq!(rig.total_calls(), 4);

    // exactly one window later is still the same window
    clock.advance(Duration::from_millis(1_000));
    let third = orch.verify(&request("cust-3")).await.expect("decision");
    assert_eq!(third.verdict, Verdict::Rejected);

    clock.advance(Duration::from_millis(1));
    let fourth = orch.verify(&request("cust-4")).await.expect("decision");
    assert_eq!(fourth.verdict, Verdict::Approved);
    assert_eq!(rig.total_calls(), 8);
}

#[tokio::test(start_paused = true)]
async fn identity_providers_down_needs_review() {
    let rig = Rig::new(down(), down(), down(), sanctions("CLEAR"));
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-5")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::ManualReview);
    assert_eq!(decision.reason, ReasonCode::Fail);
    let document = decision.document.expect("fallback outcome");
    assert_eq!(document.status, VerificationStatus::Fail);
    assert_eq!(document.confidence, 0);
    assert!(document.reasons.is_none());
    // three attempts each
    assert_eq!(rig.document.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn total_outage_fails_closed() {
    let rig = Rig::new(down(), down(), down(), down());
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-6")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::Rejected);
    assert_eq!(decision.reason, ReasonCode::SanctionsHit);
    assert_eq!(rig.total_calls(), 12);
}

#[tokio::test(start_paused = true)]
async fn hanging_providers_still_produce_a_decision() {
    let hanging = || Arc::new(NullTransport::hanging());
    let rig = Rig::new(hanging(), hanging(), hanging(), sanctions("CLEAR"));
    let mut config = KycConfig::default();
    config.providers.document.timeout_ms = 500;
    config.providers.biometric.timeout_ms = 1_000;
    config.providers.address.timeout_ms = 1_000;
    let orch = rig.orchestrator(&config, &NullClock::new());
    let start = tokio::time::Instant::now();

    let decision = orch.verify(&request("cust-7")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::ManualReview);
    assert_eq!(decision.reason, ReasonCode::Fail);
    // slowest gateway: three 1 s deadlines plus two 200 ms pauses
    assert_eq!(start.elapsed(), Duration::from_millis(3_400));
}

#[tokio::test(start_paused = true)]
async fn flaky_provider_recovers_within_the_retry_budget() {
    let rig = Rig::healthy();
    rig.biometric
        .enqueue(Reply::Fail(TransportError::Status(503)));
    rig.biometric.enqueue(Reply::RespondAfter(
        Duration::from_millis(50),
        json!({"status": "PASS", "confidence": 97, "similarityScore": 0.97}),
    ));
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-8")).await.expect("decision");

    assert_eq!(decision.verdict, Verdict::Approved);
    let biometric = decision.biometric.expect("biometric outcome");
    assert_eq!(biometric.similarity_score, Some(0.97));
    assert_eq!(rig.biometric.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn decision_serializes_for_the_caller() {
    let rig = Rig::new(pass(95), pass(95), pass(95), sanctions("CLEAR"));
    let orch = rig.orchestrator(&KycConfig::default(), &NullClock::new());

    let decision = orch.verify(&request("cust-9")).await.expect("decision");
    let body = serde_json::to_value(&decision).expect("serializable");

    assert_eq!(body["verdict"], "APPROVED");
    assert_eq!(body["reason"], "OK");
    assert_eq!(body["sanctions"]["status"], "CLEAR");
    assert_eq!(body["timestamp"], "2024-01-01T00:00:00Z");
}
