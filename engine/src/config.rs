//! Engine configuration with TOML file support.

use kyc_types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::logging::LogFormat;
use crate::EngineError;

/// Configuration for the verification service.
///
/// Can be loaded from a TOML file via [`KycConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KycConfig {
    /// Port for the HTTP API.
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to expose the Prometheus `/metrics` endpoint.
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    #[serde(default)]
    pub providers: ProvidersConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub decision: DecisionConfig,
}

/// Where and how long to wait for each provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub document: ProviderEndpoint,
    #[serde(default)]
    pub biometric: ProviderEndpoint,
    #[serde(default)]
    pub address: ProviderEndpoint,
    #[serde(default)]
    pub sanctions: ProviderEndpoint,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderEndpoint {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request path; the provider's standard path when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Deadline for a single attempt, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Retry budget shared by all gateways.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total tries per gateway call, including the first.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Delay before the second attempt, in milliseconds.
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    #[serde(default)]
    pub strategy: BackoffStrategy,

    /// Upper bound for exponential backoff, in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffStrategy {
    /// The same delay between every pair of attempts.
    #[default]
    Fixed,
    /// Delay doubles after each failed attempt, capped at `max_backoff_ms`.
    Exponential,
}

/// The single process-wide fixed window shared by every provider call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Acquisitions allowed per window.
    #[serde(default = "default_limit")]
    pub limit: u32,

    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Minimum confidence (inclusive, 0-100) for an identity check to pass.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: u8,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_rpc_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_attempts() -> u32 {
    3
}

fn default_backoff_ms() -> u64 {
    200
}

fn default_max_backoff_ms() -> u64 {
    2000
}

fn default_limit() -> u32 {
    100
}

fn default_window_ms() -> u64 {
    1000
}

fn default_confidence_threshold() -> u8 {
    80
}

// ── Impl ───────────────────────────────────────────────────────────────

impl KycConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EngineError> {
        toml::from_str(s).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.retry.attempts == 0 {
            return Err(EngineError::Config(
                "retry.attempts must be at least 1".into(),
            ));
        }
        if self.rate_limit.window_ms == 0 {
            return Err(EngineError::Config(
                "rate_limit.window_ms must be positive".into(),
            ));
        }
        if self.decision.confidence_threshold > 100 {
            return Err(EngineError::Config(format!(
                "decision.confidence_threshold must be within 0-100, got {}",
                self.decision.confidence_threshold
            )));
        }
        for kind in ProviderKind::ALL {
            let endpoint = self.providers.endpoint(kind);
            if endpoint.base_url.trim().is_empty() {
                return Err(EngineError::Config(format!(
                    "providers.{kind}.base_url is empty"
                )));
            }
            if endpoint.timeout_ms == 0 {
                return Err(EngineError::Config(format!(
                    "providers.{kind}.timeout_ms must be positive"
                )));
            }
        }
        Ok(())
    }
}

impl Default for KycConfig {
    fn default() -> Self {
        Self {
            rpc_port: default_rpc_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            enable_metrics: default_true(),
            providers: ProvidersConfig::default(),
            retry: RetryConfig::default(),
            rate_limit: RateLimitConfig::default(),
            decision: DecisionConfig::default(),
        }
    }
}

impl ProvidersConfig {
    pub fn endpoint(&self, kind: ProviderKind) -> &ProviderEndpoint {
        match kind {
            ProviderKind::Document => &self.document,
            ProviderKind::Biometric => &self.biometric,
            ProviderKind::Address => &self.address,
            ProviderKind::Sanctions => &self.sanctions,
        }
    }
}

impl ProviderEndpoint {
    /// The configured path, or the provider's standard one.
    pub fn path_for(&self, kind: ProviderKind) -> &str {
        self.path.as_deref().unwrap_or_else(|| kind.default_path())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProviderEndpoint {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            backoff_ms: default_backoff_ms(),
            strategy: BackoffStrategy::default(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_ms: default_window_ms(),
        }
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
        }
    }
}
