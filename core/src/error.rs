//! Error types for the Paystack API client.
//!
//! # Design
//! Every failure the dispatch layer can produce is a variant of `ApiError`.
//! Non-2xx responses carrying the API's `{"status": false, "message": ..}`
//! payload land in `Api` with the status code, message, and raw body for
//! debugging. Non-2xx responses whose body is not an error payload collapse to
//! `Status`, which carries only the HTTP status. Nothing here is retried; the
//! caller decides what to do with each kind.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response was received.
    Transport,
    /// The per-call deadline elapsed.
    Timeout,
    /// A success response could not be decoded into the target.
    Decode,
    /// The remote service rejected the request.
    Api,
    /// The client was used incorrectly (bad config, unencodable payload).
    CallerUsage,
}

/// Errors returned by the dispatcher and every resource service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, DNS, or IO failure before a response was received.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The call's deadline passed, either before sending or mid-flight.
    #[error("request timed out")]
    Timeout,

    /// The success body was not JSON or did not match the expected shape.
    #[error("could not decode response: {message}")]
    Decode { message: String, body: String },

    /// The server returned a structured error payload.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        kind: Option<String>,
        code: Option<String>,
        body: String,
    },

    /// The server returned a non-success status without a readable error payload.
    #[error("API request failed with HTTP {status}")]
    Status { status: u16 },

    /// The request payload could not be serialized.
    #[error("could not encode request: {0}")]
    Serialization(String),

    /// Invalid arguments or configuration supplied by the caller.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::Decode { .. } => ErrorKind::Decode,
            ApiError::Api { .. } | ApiError::Status { .. } => ErrorKind::Api,
            ApiError::Serialization(_) | ApiError::InvalidRequest(_) => ErrorKind::CallerUsage,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } | ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}
