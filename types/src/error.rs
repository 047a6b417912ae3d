//! Request validation errors.

use thiserror::Error;

/// Raised when a verification request cannot be turned into provider payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("required field `{0}` is missing or blank")]
    MissingField(&'static str),
}
