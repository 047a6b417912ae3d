//! HTTP API for the KYC verification service.
//!
//! Provides endpoints for:
//! - Verification submission (`POST /api/v1/kyc/verify`)
//! - Liveness (`GET /health`)
//! - Prometheus metrics (`GET /metrics`)

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use handlers::AppState;
pub use server::{build_router, RpcServer};
