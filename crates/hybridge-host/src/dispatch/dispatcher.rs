//! Host-side envelope dispatcher.
//!
//! Raw strings arriving from the page are classified by type prefix and
//! routed to one of three sinks:
//! - `__RawMessage` payloads fan out to registered raw-message handlers;
//! - `__InvokeJavaScriptCompleted` payloads resolve the pending-call entry
//!   matching their task id;
//! - anything else is an application-defined method name, invoked
//!   fire-and-forget through the method registry.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use hybridge_core::error::{BridgeError, Result};
use hybridge_core::protocol::envelope::{Envelope, EnvelopeKind};
use hybridge_core::protocol::invoke::Completion;

use crate::methods::MethodRegistry;
use crate::pending::PendingCalls;

/// Application sink for `__RawMessage` payloads.
#[async_trait]
pub trait RawMessageHandler: Send + Sync {
    async fn on_raw_message(&self, payload: &str);
}

/// Routes inbound envelopes from the page.
pub struct Dispatcher {
    raw_handlers: RwLock<Vec<Arc<dyn RawMessageHandler>>>,
    methods: Arc<MethodRegistry>,
    pending: Arc<PendingCalls>,
    max_message_bytes: usize,
}

impl Dispatcher {
    pub fn new(
        methods: Arc<MethodRegistry>,
        pending: Arc<PendingCalls>,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            raw_handlers: RwLock::new(Vec::new()),
            methods,
            pending,
            max_message_bytes,
        }
    }

    /// Register a raw-message handler. Handlers run in registration order.
    pub fn register_raw(&self, handler: Arc<dyn RawMessageHandler>) {
        if let Ok(mut handlers) = self.raw_handlers.write() {
            handlers.push(handler);
        }
    }

    fn raw_handlers(&self) -> Vec<Arc<dyn RawMessageHandler>> {
        self.raw_handlers
            .read()
            .map(|h| h.clone())
            .unwrap_or_default()
    }

    /// Classify and route one inbound wire string.
    pub async fn dispatch(&self, wire: &str) -> Result<()> {
        if wire.len() > self.max_message_bytes {
            return Err(BridgeError::PayloadTooLarge);
        }
        let env = Envelope::parse(wire)?;
        match env.kind {
            EnvelopeKind::RawMessage => {
                for handler in self.raw_handlers() {
                    handler.on_raw_message(&env.payload).await;
                }
                Ok(())
            }
            EnvelopeKind::InvokeCompleted => {
                let completion = Completion::parse(&env.payload)?;
                if !self
                    .pending
                    .complete(completion.task_id.as_str(), completion.result_json)
                {
                    // Legal: the caller may have timed out and abandoned it.
                    tracing::debug!(task_id = %completion.task_id, "completion for unknown task id dropped");
                }
                Ok(())
            }
            EnvelopeKind::Method(name) => {
                // Fire-and-forget path: the payload is a JSON array of
                // individually encoded parameter values (empty payload means
                // no parameters). Errors are logged, never sent back.
                let params: Vec<String> = if env.payload.is_empty() {
                    Vec::new()
                } else {
                    serde_json::from_str(&env.payload).map_err(|e| {
                        BridgeError::BadRequest(format!("method envelope payload invalid: {e}"))
                    })?
                };
                match self.methods.invoke(&name, params).await {
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(method = %name, error = %e, "fire-and-forget method invocation failed");
                    }
                }
                Ok(())
            }
        }
    }
}
