//! Error types used by the probe and mount adapters.
use thiserror::Error;

/// High-level error categories for adapter operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("timed out")]
    Timeout,
    #[error("connection refused")]
    Refused,
    #[error("could not resolve host")]
    Resolve,
    #[error("io error")]
    Io,
}

/// Structured error with a kind and human message.
#[derive(Debug, Clone, Error)]
#[error("{msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
