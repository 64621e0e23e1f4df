//! Page-side script methods (the "global scope" the host can invoke).

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// A page-side method invokable by the host. Failures carry a message only;
/// they are logged locally and never reported back.
#[async_trait]
pub trait ScriptMethod: Send + Sync {
    async fn call(&self, args: Vec<Value>) -> Result<Value, String>;
}

/// Adapter for plain closures (sync or future-returning).
pub struct FnScript<F>(pub F);

#[async_trait]
impl<F, Fut> ScriptMethod for FnScript<F>
where
    F: Fn(Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, String>> + Send,
{
    async fn call(&self, args: Vec<Value>) -> Result<Value, String> {
        (self.0)(args).await
    }
}

/// Name-keyed registry of script methods.
#[derive(Default)]
pub struct ScriptRegistry {
    methods: DashMap<String, Arc<dyn ScriptMethod>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self {
            methods: DashMap::new(),
        }
    }

    pub fn register(&self, name: impl Into<String>, method: Arc<dyn ScriptMethod>) {
        self.methods.insert(name.into(), method);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ScriptMethod>> {
        self.methods.get(name).map(|e| e.value().clone())
    }
}
