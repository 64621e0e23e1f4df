//! Shared error type across hybridge crates.

use thiserror::Error;

/// Client-facing error codes (stable API, used in JSON error bodies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message or request.
    BadRequest,
    /// Requested method is not registered.
    MethodNotFound,
    /// Message exceeds the configured size cap.
    PayloadTooLarge,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::MethodNotFound => "METHOD_NOT_FOUND",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type used by core, host, and web shim.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("bad envelope: {0}")]
    BadEnvelope(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("method not found: {0}")]
    MethodNotFound(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("bridge channel closed")]
    ChannelClosed,
    #[error("internal: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            BridgeError::BadEnvelope(_) => ClientCode::BadRequest,
            BridgeError::BadRequest(_) => ClientCode::BadRequest,
            BridgeError::MethodNotFound(_) => ClientCode::MethodNotFound,
            BridgeError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            BridgeError::ChannelClosed => ClientCode::Internal,
            BridgeError::Internal(_) => ClientCode::Internal,
        }
    }
}
