//! Protocol modules (envelope codec + invocation shapes).
//!
//! The wire format between the page and the host is a single UTF-8 string of
//! the form `<type>|<payload>`. Only the FIRST `|` is significant; payloads
//! are free to contain further `|` characters (JSON documents routinely do).
//!
//! All parsers are panic-free: malformed input is reported as `BridgeError`
//! instead of panicking, keeping the host resilient to hostile page content.

pub mod envelope;
pub mod invoke;

pub use envelope::{Envelope, EnvelopeKind, MSG_TYPE_INVOKE_COMPLETED, MSG_TYPE_RAW_MESSAGE};
pub use invoke::{
    Completion, InvokeRequest, InvokeResponse, TaskId, INVOKE_ENDPOINT_PATH, INVOKE_QUERY_PARAM,
};
