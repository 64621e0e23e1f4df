//! Pending-call correlation layer.
//!
//! Each host-initiated JavaScript invocation parks a oneshot sender here,
//! keyed by task id. Completions resolve the matching entry; everything else
//! about a call stays local to its awaiting future. Correlation is by task id
//! only — the channel does not guarantee ordering across embedding mechanisms.

use dashmap::DashMap;
use tokio::sync::oneshot;

use hybridge_core::error::{BridgeError, Result};
use hybridge_core::protocol::invoke::TaskId;

/// In-flight host-to-page invocations awaiting their completion envelope.
#[derive(Default)]
pub struct PendingCalls {
    inflight: DashMap<String, oneshot::Sender<String>>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self {
            inflight: DashMap::new(),
        }
    }

    /// Register a task id and return the receiver its completion will resolve.
    /// Task ids must be unique among in-flight requests.
    pub fn register(&self, task_id: &TaskId) -> Result<oneshot::Receiver<String>> {
        if self.inflight.contains_key(task_id.as_str()) {
            return Err(BridgeError::BadRequest(format!(
                "task id already in flight: {task_id}"
            )));
        }
        let (tx, rx) = oneshot::channel();
        self.inflight.insert(task_id.as_str().to_string(), tx);
        Ok(rx)
    }

    /// Resolve a pending call with its JSON-encoded result.
    /// Returns false when no matching entry exists (late or unknown
    /// completion — legal, the caller may have timed out and abandoned it).
    pub fn complete(&self, task_id: &str, result_json: String) -> bool {
        match self.inflight.remove(task_id) {
            Some((_, tx)) => tx.send(result_json).is_ok(),
            None => false,
        }
    }

    /// Drop a pending entry without resolving it (caller gave up).
    pub fn abandon(&self, task_id: &TaskId) -> bool {
        self.inflight.remove(task_id.as_str()).is_some()
    }

    pub fn in_flight(&self) -> usize {
        self.inflight.len()
    }
}
