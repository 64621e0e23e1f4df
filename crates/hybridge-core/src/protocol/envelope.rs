//! Envelope codec (`<type>|<payload>`).

use crate::error::{BridgeError, Result};

/// Wire type for raw application messages.
pub const MSG_TYPE_RAW_MESSAGE: &str = "__RawMessage";

/// Wire type for JavaScript-invocation completion messages.
pub const MSG_TYPE_INVOKE_COMPLETED: &str = "__InvokeJavaScriptCompleted";

/// Prefix reserved for bridge-internal message types.
const RESERVED_PREFIX: &str = "__";

/// Classified envelope type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeKind {
    /// Opaque application message, surfaced to raw-message handlers.
    RawMessage,
    /// Completion of a host-initiated JavaScript invocation.
    InvokeCompleted,
    /// Application-defined method name (fire-and-forget invocation path).
    Method(String),
}

impl EnvelopeKind {
    /// Stable wire name for this kind.
    pub fn wire_name(&self) -> &str {
        match self {
            EnvelopeKind::RawMessage => MSG_TYPE_RAW_MESSAGE,
            EnvelopeKind::InvokeCompleted => MSG_TYPE_INVOKE_COMPLETED,
            EnvelopeKind::Method(name) => name.as_str(),
        }
    }
}

/// A decoded `type|payload` wire string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub kind: EnvelopeKind,
    /// Opaque payload (raw text or JSON). May contain `|`.
    pub payload: String,
}

impl Envelope {
    /// Raw application message envelope.
    pub fn raw(payload: impl Into<String>) -> Self {
        Self {
            kind: EnvelopeKind::RawMessage,
            payload: payload.into(),
        }
    }

    /// JavaScript-invocation completion envelope.
    pub fn completed(payload: impl Into<String>) -> Self {
        Self {
            kind: EnvelopeKind::InvokeCompleted,
            payload: payload.into(),
        }
    }

    /// Application-defined method envelope. The name must be non-empty and
    /// must not use the reserved `__` prefix.
    pub fn method(name: impl Into<String>, payload: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(BridgeError::BadEnvelope("empty method name".into()));
        }
        if name.starts_with(RESERVED_PREFIX) {
            return Err(BridgeError::BadEnvelope(format!(
                "method name uses reserved prefix: {name}"
            )));
        }
        if name.contains('|') {
            return Err(BridgeError::BadEnvelope(format!(
                "method name contains separator: {name}"
            )));
        }
        Ok(Self {
            kind: EnvelopeKind::Method(name),
            payload: payload.into(),
        })
    }

    /// Encode to the `type|payload` wire string.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.kind.wire_name(), self.payload)
    }

    /// Parse a wire string. Splits on the FIRST `|` only.
    pub fn parse(wire: &str) -> Result<Self> {
        let Some((ty, payload)) = wire.split_once('|') else {
            return Err(BridgeError::BadEnvelope("missing `|` separator".into()));
        };
        let kind = match ty {
            MSG_TYPE_RAW_MESSAGE => EnvelopeKind::RawMessage,
            MSG_TYPE_INVOKE_COMPLETED => EnvelopeKind::InvokeCompleted,
            "" => return Err(BridgeError::BadEnvelope("empty message type".into())),
            other if other.starts_with(RESERVED_PREFIX) => {
                return Err(BridgeError::BadEnvelope(format!(
                    "unknown reserved message type: {other}"
                )));
            }
            other => EnvelopeKind::Method(other.to_string()),
        };
        Ok(Self {
            kind,
            payload: payload.to_string(),
        })
    }
}
