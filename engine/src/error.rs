use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] kyc_types::RequestError),

    #[error("config error: {0}")]
    Config(String),

    #[error("transport setup error: {0}")]
    Transport(#[from] kyc_providers::TransportError),
}
