//! KYC verification engine — runs one verification across four providers.
//!
//! The engine is the core of the service:
//! - Validates the incoming request
//! - Calls the document, biometric, address and sanctions providers concurrently
//! - Guards every call with a shared rate limiter, a per-attempt timeout and retries
//! - Substitutes local fallback outcomes when a provider cannot be reached
//! - Reduces the four outcomes to a verdict with a fixed precedence order

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod metrics;
pub mod orchestrator;
pub mod policy;
pub mod rate_limiter;
pub mod retry;
pub mod shutdown;
pub mod tracing_spans;

pub use config::{
    BackoffStrategy, DecisionConfig, KycConfig, ProviderEndpoint, ProvidersConfig,
    RateLimitConfig, RetryConfig,
};
pub use error::EngineError;
pub use gateway::{ProviderGateway, Resolution};
pub use logging::{init_logging, LogFormat};
pub use metrics::KycMetrics;
pub use orchestrator::{ProviderTransports, VerificationOrchestrator};
pub use policy::DecisionPolicy;
pub use rate_limiter::RateLimiter;
pub use retry::{Backoff, RetryPolicy};
pub use shutdown::ShutdownController;
