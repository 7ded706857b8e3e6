//! Top-level facade crate for the ThinCloud device SDK.
//!
//! Re-exports the core codec and the client layer so device applications
//! can depend on a single crate.

pub mod core {
    pub use thincloud_core::*;
}

pub mod client {
    pub use thincloud_client::*;
}
