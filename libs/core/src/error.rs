use http::StatusCode;
use thiserror::Error;

use crate::http::TransportError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("api returned error ({status}): {message}")]
    Status {
        status: StatusCode,
        message: String,
        body: String,
    },
    #[error("failed to decode {endpoint} response (status {status})")]
    Decode {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unexpected {endpoint} response: expected {expected}")]
    UnexpectedShape {
        endpoint: &'static str,
        expected: &'static str,
    },
    /// A 2xx response whose body reports that the call failed.
    #[error("{endpoint} request rejected (code {code}): {message}")]
    Rejected {
        endpoint: &'static str,
        code: i64,
        message: String,
    },
    #[error("failed to encode request payload")]
    Encode(#[source] serde_json::Error),
    #[error("{0}")]
    InvalidArgument(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body for status and decode failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Status { body, .. } | ApiError::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
