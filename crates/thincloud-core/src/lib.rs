//! ThinCloud core: topic construction and envelope codec.
//!
//! This crate defines the wire-level contracts shared by the client layer
//! and device firmware integrations: the standard topic shapes for
//! commissioning, commands, and service requests, plus the JSON-RPC-like
//! envelopes exchanged over them. It intentionally carries no transport or
//! runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ThinCloudError`/`Result` so device
//! processes do not crash on malformed payloads.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod buffer;
pub mod envelope;
pub mod error;
pub mod topic;

/// Shared result type.
pub use error::{Result, ThinCloudError};
