//! hybridge host binary.
//!
//! Serves the local invoke endpoint and logs raw messages arriving from the
//! page. Embedders register their own host methods and page proxy; this
//! binary is the minimal runnable host.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing_subscriber::{fmt, EnvFilter};

use hybridge_host::{app_state, config, dispatch::RawMessageHandler, router};

struct LogRawMessages;

#[async_trait]
impl RawMessageHandler for LogRawMessages {
    async fn on_raw_message(&self, payload: &str) {
        tracing::info!(payload, "raw message from page");
    }
}

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("hybridge.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .host
        .listen
        .parse()
        .expect("host.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg);
    state.dispatcher().register_raw(Arc::new(LogRawMessages));

    let app = router::build_router(state);

    tracing::info!(%listen, "hybridge-host starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
