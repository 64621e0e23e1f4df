//! hybridge core: transport-agnostic wire contracts for the web/host bridge.
//!
//! This crate defines the envelope codec, the invocation request/response
//! shapes, task-identifier correlation tokens, and the shared error surface.
//! It intentionally carries no transport or runtime dependencies so both the
//! host side and the page-side shim can reuse it.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `BridgeError`/`Result` so a hostile or
//! buggy page cannot crash the host process with a malformed message.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{BridgeError, Result};
