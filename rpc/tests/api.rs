//! HTTP API tests against the router, with nullable providers behind it.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use kyc_engine::{
    KycConfig, KycMetrics, ProviderTransports, ShutdownController, VerificationOrchestrator,
};
use kyc_nullables::{NullClock, NullTransport};
use kyc_rpc::{build_router, AppState, RpcServer};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn state(sanctions_status: &str, metrics_enabled: bool) -> Arc<AppState> {
    let pass = || Arc::new(NullTransport::responding(json!({"status": "PASS", "confidence": 91})));
    let transports = ProviderTransports {
        document: pass(),
        biometric: pass(),
        address: pass(),
        sanctions: Arc::new(NullTransport::responding(json!({"status": sanctions_status}))),
    };
    let orchestrator = VerificationOrchestrator::new(
        &KycConfig::default(),
        transports,
        Arc::new(NullClock::new()),
        Arc::new(KycMetrics::new()),
    );
    Arc::new(AppState {
        orchestrator: Arc::new(orchestrator),
        metrics_enabled,
    })
}

fn request_body() -> Value {
    json!({
        "customerId": "cust-77",
        "fullName": "Katherine Johnson",
        "dateOfBirth": "1918-08-26",
        "nationality": "US",
        "documentType": "DRIVING_LICENCE",
        "documentNumber": "D7654321",
        "selfieUrl": "https://cdn.example/selfie.jpg",
        "idPhotoUrl": "https://cdn.example/id.jpg",
        "address": "Hampton, Virginia"
    })
}

fn post_verify(body: String) -> Request<Body> {
    Request::post("/api/v1/kyc/verify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

// ---------------------------------------------------------------------------
// Routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn verify_returns_the_decision() {
    let router = build_router(state("CLEAR", true));

    let (status, body) = send(router, post_verify(request_body().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let decision: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(decision["verdict"], "APPROVED");
    assert_eq!(decision["reason"], "OK");
    assert_eq!(decision["document"]["confidence"], 91);
}

#[tokio::test]
async fn sanctions_hit_is_a_rejection_not_an_error() {
    let router = build_router(state("HIT", true));

    let (status, body) = send(router, post_verify(request_body().to_string())).await;

    assert_eq!(status, StatusCode::OK);
    let decision: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(decision["verdict"], "REJECTED");
    assert_eq!(decision["reason"], "SANCTIONS_HIT");
}

#[tokio::test]
async fn blank_required_field_is_bad_request() {
    let mut body = request_body();
    body["documentNumber"] = json!("   ");
    let router = build_router(state("CLEAR", true));

    let (status, body) = send(router, post_verify(body.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("documentNumber"));
}

#[tokio::test]
async fn malformed_json_is_rejected_by_the_extractor() {
    let router = build_router(state("CLEAR", true));

    let (status, _) = send(router, post_verify("{not json".into())).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn health_is_ok() {
    let router = build_router(state("CLEAR", true));

    let (status, body) = send(router, Request::get("/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"status": "ok"}));
}

#[tokio::test]
async fn metrics_reflect_decisions() {
    let state = state("CLEAR", true);

    let (status, _) = send(build_router(state.clone()), post_verify(request_body().to_string())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        build_router(state),
        Request::get("/metrics").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("kyc_decision_total{result=\"APPROVED\"} 1"));
    assert!(body.contains("kyc_provider_calls_total{provider=\"biometric\",result=\"response\"} 1"));
}

#[tokio::test]
async fn metrics_can_be_disabled() {
    let router = build_router(state("CLEAR", false));

    let (status, _) = send(router, Request::get("/metrics").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Server lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_answers_then_stops_on_shutdown() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = ShutdownController::new();
    let server = RpcServer::new(addr.port(), state("CLEAR", true));
    let stopped = shutdown.notified();
    let handle = tokio::spawn(async move { server.serve(listener, stopped).await });

    let health: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    shutdown.shutdown();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server stops")
        .expect("server task");
    assert!(result.is_ok());
}
