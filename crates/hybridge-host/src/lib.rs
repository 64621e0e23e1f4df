//! hybridge host library entry.
//!
//! This crate wires the host side of the bridge: the envelope dispatcher, the
//! host-method registry behind the local invoke endpoint, the pending-call
//! correlation layer, and the `PageProxy` seam toward the native web view.
//! It is consumed by the binary (`main.rs`), by embedders, and by the
//! integration tests.

pub mod app_state;
pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod methods;
pub mod pending;
pub mod router;
