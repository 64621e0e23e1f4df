//! Embedding-channel capability detection.
//!
//! The page can be hosted behind one of three mutually-exclusive native
//! messaging mechanisms. They are probed once at initialization, in a fixed
//! priority order, and the winner is recorded as a tagged variant — no
//! per-call duck-typing.

use std::sync::Arc;

/// Outbound half of a native embedding channel (postMessage-shaped:
/// fire-and-forget, no result, no error to the caller).
pub trait MessageSink: Send + Sync {
    fn send_message(&self, message: String);
}

/// What the embedder exposes to the page. Each slot mirrors one of the three
/// host mechanisms; absent slots simply are not probed successfully.
#[derive(Default, Clone)]
pub struct WebEnvironment {
    /// Message-channel object with an event-listener API.
    pub message_channel: Option<Arc<dyn MessageSink>>,
    /// messageHandlers-style postMessage API.
    pub message_handlers: Option<Arc<dyn MessageSink>>,
    /// Named global host object with a `sendMessage` method.
    pub host_object: Option<Arc<dyn MessageSink>>,
}

impl WebEnvironment {
    /// Environment exposing nothing (detection will fail, sends will drop).
    pub fn none() -> Self {
        Self::default()
    }
}

/// Which mechanism won the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    MessageChannel,
    MessageHandlers,
    HostObject,
}

/// The channel chosen at initialization.
#[derive(Clone)]
pub struct HostChannel {
    kind: ChannelKind,
    sink: Arc<dyn MessageSink>,
}

impl HostChannel {
    /// Probe the environment in fixed priority order; first match wins.
    pub fn detect(env: &WebEnvironment) -> Option<Self> {
        if let Some(sink) = &env.message_channel {
            return Some(Self {
                kind: ChannelKind::MessageChannel,
                sink: Arc::clone(sink),
            });
        }
        if let Some(sink) = &env.message_handlers {
            return Some(Self {
                kind: ChannelKind::MessageHandlers,
                sink: Arc::clone(sink),
            });
        }
        if let Some(sink) = &env.host_object {
            return Some(Self {
                kind: ChannelKind::HostObject,
                sink: Arc::clone(sink),
            });
        }
        None
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn send(&self, message: String) {
        self.sink.send_message(message);
    }
}
