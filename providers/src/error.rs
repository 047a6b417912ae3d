use std::time::Duration;
use thiserror::Error;

/// A failed wire call. Every variant is retried by the gateway and, once the
/// attempt budget is spent, turned into the provider's fallback outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    #[error("provider unreachable: {0}")]
    Connect(String),

    #[error("provider returned HTTP status {0}")]
    Status(u16),

    #[error("provider did not answer within {0:?}")]
    Timeout(Duration),

    #[error("invalid response from provider: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Status(_) => "status",
            Self::Timeout(_) => "timeout",
            Self::Decode(_) => "decode",
            Self::Other(_) => "other",
        }
    }
}
