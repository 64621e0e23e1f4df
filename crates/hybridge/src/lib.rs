//! Top-level facade crate for hybridge.
//!
//! Re-exports the wire contracts, the host side, and the page-side shim so
//! embedders can depend on a single crate.

pub mod core {
    pub use hybridge_core::*;
}

pub mod host {
    pub use hybridge_host::*;
}

pub mod web {
    pub use hybridge_web::*;
}
