//! Host-to-page bridge: raw message posting and JavaScript invocation with
//! task-id correlation.
//!
//! `invoke_javascript` suspends its caller until the page's completion
//! envelope arrives. No timeout is enforced here — completion delivery is
//! at-most-once (a throwing page method never reports back), so callers that
//! need bounded waits wrap the returned future themselves.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use hybridge_core::error::{BridgeError, Result};
use hybridge_core::protocol::envelope::Envelope;
use hybridge_core::protocol::invoke::TaskId;

use crate::dispatch::Dispatcher;
use crate::pending::PendingCalls;

/// Seam toward the native web view hosting the page.
///
/// Embedders back this with whatever their platform web view offers; tests
/// and the demo wire it to an in-process shim.
#[async_trait]
pub trait PageProxy: Send + Sync {
    /// Ask the page to run `HybridWebView.__InvokeJavaScript(taskId, method, args)`.
    async fn invoke_script(&self, task_id: &TaskId, method: &str, args: Vec<Value>)
        -> Result<()>;

    /// Deliver a wire string to the page's native-message listener.
    async fn post_message(&self, message: String) -> Result<()>;
}

/// Render the page-side invocation call for eval-based embedders.
pub fn invoke_script_source(task_id: &TaskId, method: &str, args: &[Value]) -> Result<String> {
    let task = serde_json::to_string(task_id.as_str())
        .map_err(|e| BridgeError::Internal(format!("task id encode failed: {e}")))?;
    let method = serde_json::to_string(method)
        .map_err(|e| BridgeError::Internal(format!("method name encode failed: {e}")))?;
    let args = serde_json::to_string(args)
        .map_err(|e| BridgeError::BadRequest(format!("args encode failed: {e}")))?;
    Ok(format!(
        "HybridWebView.__InvokeJavaScript({task}, {method}, {args})"
    ))
}

/// Removes the pending entry when the awaiting caller goes away.
///
/// Callers impose their own timeouts by dropping the `invoke_javascript`
/// future; without this, every abandoned call would strand its entry in the
/// correlation map. Abandoning an already-completed entry is a no-op.
struct PendingGuard {
    pending: Arc<PendingCalls>,
    task_id: TaskId,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.pending.abandon(&self.task_id);
    }
}

/// Host handle for one embedded page.
pub struct BridgeHost {
    proxy: Arc<dyn PageProxy>,
    pending: Arc<PendingCalls>,
    dispatcher: Arc<Dispatcher>,
}

impl BridgeHost {
    pub fn new(
        proxy: Arc<dyn PageProxy>,
        pending: Arc<PendingCalls>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        Self {
            proxy,
            pending,
            dispatcher,
        }
    }

    /// Post `__RawMessage|message` to the page.
    pub async fn send_raw_message(&self, message: &str) -> Result<()> {
        self.proxy.post_message(Envelope::raw(message).encode()).await
    }

    /// Invoke a page-side method and await its JSON-decoded result.
    ///
    /// Dropping the returned future (a caller-imposed timeout) releases the
    /// task's correlation entry; a completion arriving after that is dropped
    /// by the dispatcher.
    pub async fn invoke_javascript(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let task_id = TaskId::next();
        let rx = self.pending.register(&task_id)?;
        let _guard = PendingGuard {
            pending: Arc::clone(&self.pending),
            task_id: task_id.clone(),
        };

        self.proxy.invoke_script(&task_id, method, args).await?;

        let result_json = rx.await.map_err(|_| BridgeError::ChannelClosed)?;
        serde_json::from_str(&result_json).map_err(|e| {
            BridgeError::BadRequest(format!("completion result is not valid json: {e}"))
        })
    }

    /// Feed one inbound wire string from the web view into the dispatcher.
    pub async fn handle_web_message(&self, wire: &str) -> Result<()> {
        self.dispatcher.dispatch(wire).await
    }
}
