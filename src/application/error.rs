use std::time::Duration;

use crate::domain::error::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
    #[error("correlation id mismatch: sent {expected} but peer answered {actual}")]
    CorrelationMismatch { expected: i32, actual: i32 },
    #[error("unsupported api key {api_key} version {api_version}")]
    UnsupportedApi { api_key: i16, api_version: i16 },
}

impl ApplicationError {
    /// The codec failure behind this error, if any.
    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            ApplicationError::Codec(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApplicationError>;
