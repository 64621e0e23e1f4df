//! Shared application state for the hybridge host.

use std::sync::Arc;

use crate::config::HostConfig;
use crate::dispatch::Dispatcher;
use crate::methods::MethodRegistry;
use crate::pending::PendingCalls;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: HostConfig,
    methods: Arc<MethodRegistry>,
    pending: Arc<PendingCalls>,
    dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(cfg: HostConfig) -> Self {
        let methods = Arc::new(MethodRegistry::new());
        let pending = Arc::new(PendingCalls::new());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&methods),
            Arc::clone(&pending),
            cfg.host.max_message_bytes,
        ));
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                methods,
                pending,
                dispatcher,
            }),
        }
    }

    pub fn cfg(&self) -> &HostConfig {
        &self.inner.cfg
    }

    pub fn methods(&self) -> Arc<MethodRegistry> {
        Arc::clone(&self.inner.methods)
    }

    pub fn pending(&self) -> Arc<PendingCalls> {
        Arc::clone(&self.inner.pending)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.inner.dispatcher)
    }
}
