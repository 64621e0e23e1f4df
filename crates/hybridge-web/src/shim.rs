//! The transport shim itself: one uniform send/receive API over whichever
//! embedding channel the probe found.

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::Value;
use tokio::sync::mpsc;

use hybridge_core::error::{BridgeError, Result};
use hybridge_core::protocol::envelope::Envelope;
use hybridge_core::protocol::invoke::{
    Completion, InvokeRequest, InvokeResponse, TaskId, INVOKE_ENDPOINT_PATH, INVOKE_QUERY_PARAM,
};

use crate::channel::{ChannelKind, HostChannel, WebEnvironment};
use crate::script::ScriptRegistry;

/// Network-style transport toward the local invoke endpoint.
///
/// `get_json` issues `GET <path_and_query>` with `Accept: application/json`
/// and returns the response body, or `None` when the host answered without
/// one.
#[async_trait]
pub trait HostInvoker: Send + Sync {
    async fn get_json(&self, path_and_query: &str) -> Result<Option<String>>;
}

/// Page-side bridge endpoint.
///
/// `initialize` runs once per page load and registers exactly one inbound
/// listener (`on_native_message`); idempotency is caller-enforced.
pub struct WebShim {
    channel: Option<HostChannel>,
    scripts: Arc<ScriptRegistry>,
    invoker: Arc<dyn HostInvoker>,
    events: mpsc::UnboundedSender<String>,
}

impl WebShim {
    /// Probe the environment, bind the inbound event stream, and return the
    /// shim plus the uniform message-received stream.
    pub fn initialize(
        env: &WebEnvironment,
        invoker: Arc<dyn HostInvoker>,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let channel = HostChannel::detect(env);
        match &channel {
            Some(c) => tracing::debug!(kind = ?c.kind(), "embedding channel detected"),
            None => tracing::warn!("no embedding channel detected; outbound messages will drop"),
        }
        let (events, events_rx) = mpsc::unbounded_channel();
        let shim = Self {
            channel,
            scripts: Arc::new(ScriptRegistry::new()),
            invoker,
            events,
        };
        (shim, events_rx)
    }

    /// Which mechanism the probe selected, if any.
    pub fn channel_kind(&self) -> Option<ChannelKind> {
        self.channel.as_ref().map(|c| c.kind())
    }

    /// Registry of page-side methods the host may invoke.
    pub fn scripts(&self) -> &ScriptRegistry {
        &self.scripts
    }

    /// The single inbound listener: re-dispatch a native message as a uniform
    /// event carrying the raw wire string.
    pub fn on_native_message(&self, message: String) {
        if self.events.send(message).is_err() {
            tracing::debug!("message-received stream dropped; inbound message discarded");
        }
    }

    fn send_to_host(&self, wire: String) {
        match &self.channel {
            Some(channel) => channel.send(wire),
            None => {
                // One diagnostic entry per attempt; never an error to the caller.
                tracing::error!(
                    "unable to send message to host: embedding environment unknown"
                );
            }
        }
    }

    /// Transmit `__RawMessage|message`.
    pub fn send_raw_message(&self, message: &str) {
        self.send_to_host(Envelope::raw(message).encode());
    }

    /// Post a fire-and-forget host method call over the embedding channel:
    /// `<method>|<json array of individually encoded params>`. No response
    /// and no correlation — the envelope-borne sibling of
    /// `invoke_host_method`. Errors only on unencodable input or a reserved
    /// method name.
    pub fn post_host_method(&self, method: &str, params: &[Value]) -> Result<()> {
        let req = InvokeRequest::with_params(method, params)?;
        let payload = if req.params().is_empty() {
            String::new()
        } else {
            serde_json::to_string(req.params())
                .map_err(|e| BridgeError::BadRequest(format!("params encode failed: {e}")))?
        };
        self.send_to_host(Envelope::method(method, payload)?.encode());
        Ok(())
    }

    /// Invoke a host method over the local endpoint and await its decoded
    /// result. Each parameter is JSON-serialized independently before the
    /// request itself is serialized.
    pub async fn invoke_host_method(&self, method: &str, params: &[Value]) -> Result<Value> {
        let req = InvokeRequest::with_params(method, params)?;
        let body = serde_json::to_string(&req)
            .map_err(|e| BridgeError::BadRequest(format!("request encode failed: {e}")))?;
        let encoded = utf8_percent_encode(&body, NON_ALPHANUMERIC);
        let path = format!("{INVOKE_ENDPOINT_PATH}?{INVOKE_QUERY_PARAM}={encoded}");

        let Some(raw) = self.invoker.get_json(&path).await? else {
            return Ok(Value::Null);
        };
        if raw.trim().is_empty() {
            return Ok(Value::Null);
        }

        let resp: InvokeResponse = match serde_json::from_str(&raw) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::debug!(error = %e, "malformed invoke response body; resolving empty");
                return Ok(Value::Null);
            }
        };
        match resp.value() {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!(error = %e, "invoke result not decodable; resolving empty");
                Ok(Value::Null)
            }
        }
    }

    /// Run a page-side method on behalf of the host and report its result as
    /// `__InvokeJavaScriptCompleted|taskId|json`. Failures are logged locally
    /// and produce no outgoing envelope — the host applies its own timeout.
    pub async fn invoke_javascript_method(&self, task_id: &str, method: &str, args: Vec<Value>) {
        let Some(script) = self.scripts.get(method) else {
            tracing::error!(method, "script method not found in page scope");
            return;
        };
        match script.call(args).await {
            Ok(result) => {
                let json = match serde_json::to_string(&result) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!(method, error = %e, "script result not serializable");
                        return;
                    }
                };
                let completion = Completion::new(TaskId::from(task_id), json);
                self.send_to_host(completion.into_envelope().encode());
            }
            Err(e) => {
                tracing::error!(method, error = %e, "script method failed");
            }
        }
    }
}
