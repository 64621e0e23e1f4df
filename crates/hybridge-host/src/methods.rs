//! Host-method registry (the JSON-RPC-style invocation target).
//!
//! Methods receive their parameters still individually JSON-encoded, exactly
//! as they appear in `ParamValues`; `decode_param` recovers typed values.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use hybridge_core::error::{BridgeError, Result};
use hybridge_core::protocol::invoke::InvokeResponse;

/// Result of a host-method invocation, mapped onto `{IsJson, Result}`.
#[derive(Debug, Clone)]
pub enum MethodOutput {
    /// JSON value (`IsJson: true` on the wire).
    Json(Value),
    /// Plain string (`IsJson: false` on the wire).
    Text(String),
}

impl MethodOutput {
    pub fn into_response(self) -> Result<InvokeResponse> {
        match self {
            MethodOutput::Json(v) => InvokeResponse::json(&v),
            MethodOutput::Text(s) => Ok(InvokeResponse::text(s)),
        }
    }
}

/// A host method invokable from the page.
#[async_trait]
pub trait HostMethod: Send + Sync {
    fn name(&self) -> &'static str;
    async fn invoke(&self, params: Vec<String>) -> Result<MethodOutput>;
}

/// Registry of host methods, keyed by method name.
#[derive(Default)]
pub struct MethodRegistry {
    methods: DashMap<&'static str, Arc<dyn HostMethod>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: DashMap::new(),
        }
    }

    pub fn register(&self, method: Arc<dyn HostMethod>) {
        self.methods.insert(method.name(), method);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|e| *e.key()).collect()
    }

    /// Invoke a registered method and map its output onto the wire response.
    pub async fn invoke(&self, name: &str, params: Vec<String>) -> Result<InvokeResponse> {
        let method = self
            .methods
            .get(name)
            .ok_or_else(|| BridgeError::MethodNotFound(name.to_string()))?
            .value()
            .clone();
        method.invoke(params).await?.into_response()
    }
}

/// Decode the parameter at `index` from its individual JSON encoding.
pub fn decode_param<T: DeserializeOwned>(params: &[String], index: usize) -> Result<T> {
    let raw = params.get(index).ok_or_else(|| {
        BridgeError::BadRequest(format!("missing parameter at index {index}"))
    })?;
    serde_json::from_str(raw)
        .map_err(|e| BridgeError::BadRequest(format!("invalid parameter at index {index}: {e}")))
}

/// Require an exact parameter count.
pub fn expect_params(params: &[String], count: usize) -> Result<()> {
    if params.len() != count {
        return Err(BridgeError::BadRequest(format!(
            "expected {count} parameters, got {}",
            params.len()
        )));
    }
    Ok(())
}
