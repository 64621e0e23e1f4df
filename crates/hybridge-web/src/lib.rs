//! hybridge web: the page-side transport shim.
//!
//! Normalizes the three native embedding channels into one event-based API,
//! serializes outgoing calls into the `type|payload` wire format, and runs
//! page-side method invocations requested by the host. This is the Rust
//! rendering of the script injected into the embedded web surface.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod channel;
pub mod script;
pub mod shim;

pub use channel::{ChannelKind, HostChannel, MessageSink, WebEnvironment};
pub use script::{FnScript, ScriptMethod, ScriptRegistry};
pub use shim::{HostInvoker, WebShim};
