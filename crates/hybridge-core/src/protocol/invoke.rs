//! Invocation request/response shapes and task-id correlation tokens.
//!
//! Field names on the wire are PascalCase (`MethodName`, `ParamValues`,
//! `IsJson`, `Result`) and each parameter value in `ParamValues` is
//! independently JSON-encoded BEFORE the outer request is serialized. That
//! ordering is load-bearing: it lets parameters of heterogeneous shapes ride
//! in a homogeneous `Vec<String>`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, Result};
use crate::protocol::envelope::Envelope;

/// Well-known local endpoint path for host-method invocation.
pub const INVOKE_ENDPOINT_PATH: &str = "/__hwvInvokeDotNet";

/// Query parameter carrying the serialized invocation request.
pub const INVOKE_QUERY_PARAM: &str = "data";

/// Host-method invocation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvokeRequest {
    #[serde(rename = "MethodName")]
    pub method_name: String,
    /// Individually JSON-encoded parameter values. Omitted when empty.
    #[serde(rename = "ParamValues", default, skip_serializing_if = "Option::is_none")]
    pub param_values: Option<Vec<String>>,
}

impl InvokeRequest {
    /// Request with no parameters.
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            param_values: None,
        }
    }

    /// Request with parameters, each serialized independently.
    pub fn with_params(method_name: impl Into<String>, params: &[Value]) -> Result<Self> {
        let mut values = Vec::with_capacity(params.len());
        for p in params {
            let s = serde_json::to_string(p)
                .map_err(|e| BridgeError::BadRequest(format!("param encode failed: {e}")))?;
            values.push(s);
        }
        Ok(Self {
            method_name: method_name.into(),
            param_values: if values.is_empty() { None } else { Some(values) },
        })
    }

    /// Parameter list view (empty slice when omitted).
    pub fn params(&self) -> &[String] {
        self.param_values.as_deref().unwrap_or(&[])
    }
}

/// Host-method invocation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvokeResponse {
    #[serde(rename = "IsJson")]
    pub is_json: bool,
    /// JSON document when `is_json`, plain string otherwise.
    #[serde(rename = "Result")]
    pub result: String,
}

impl InvokeResponse {
    /// Response carrying a JSON value.
    pub fn json(value: &Value) -> Result<Self> {
        let result = serde_json::to_string(value)
            .map_err(|e| BridgeError::Internal(format!("result encode failed: {e}")))?;
        Ok(Self { is_json: true, result })
    }

    /// Response carrying a plain string.
    pub fn text(result: impl Into<String>) -> Self {
        Self {
            is_json: false,
            result: result.into(),
        }
    }

    /// Decode into a value: parsed JSON when `is_json`, the raw string
    /// otherwise. Strict — callers that want lenient handling map the error.
    pub fn value(&self) -> Result<Value> {
        if self.is_json {
            serde_json::from_str(&self.result)
                .map_err(|e| BridgeError::BadRequest(format!("result is not valid json: {e}")))
        } else {
            Ok(Value::String(self.result.clone()))
        }
    }
}

/// Opaque caller-chosen correlation token for asynchronous completions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(String);

static NEXT_TASK: AtomicU64 = AtomicU64::new(1);

impl TaskId {
    /// Next process-locally unique task id.
    pub fn next() -> Self {
        let n = NEXT_TASK.fetch_add(1, Ordering::Relaxed);
        Self(format!("task-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded `__InvokeJavaScriptCompleted` payload (`<taskId>|<result-json>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub task_id: TaskId,
    /// JSON-encoded invocation result. May contain `|`.
    pub result_json: String,
}

impl Completion {
    pub fn new(task_id: TaskId, result_json: impl Into<String>) -> Self {
        Self {
            task_id,
            result_json: result_json.into(),
        }
    }

    /// Parse a completion payload. Splits on the FIRST `|` only so the JSON
    /// result may itself contain separators.
    pub fn parse(payload: &str) -> Result<Self> {
        let Some((task_id, result_json)) = payload.split_once('|') else {
            return Err(BridgeError::BadEnvelope(
                "completion payload missing task id separator".into(),
            ));
        };
        if task_id.is_empty() {
            return Err(BridgeError::BadEnvelope("empty task id".into()));
        }
        Ok(Self {
            task_id: TaskId::from(task_id),
            result_json: result_json.to_string(),
        })
    }

    /// Encode as a completion payload string.
    pub fn encode_payload(&self) -> String {
        format!("{}|{}", self.task_id, self.result_json)
    }

    /// Wrap in a full `__InvokeJavaScriptCompleted` envelope.
    pub fn into_envelope(self) -> Envelope {
        Envelope::completed(self.encode_payload())
    }
}
