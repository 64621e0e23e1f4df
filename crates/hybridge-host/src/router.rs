//! Axum router wiring.
//!
//! Exposes the single well-known invoke endpoint used by the page-side shim.

use axum::{routing::get, Router};

use hybridge_core::protocol::invoke::INVOKE_ENDPOINT_PATH;

use crate::{app_state::AppState, endpoint};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(INVOKE_ENDPOINT_PATH, get(endpoint::invoke_handler))
        .with_state(state)
}
