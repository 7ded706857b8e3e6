//! ThinCloud client library entry.
//!
//! This crate wires the core codec to an MQTT session: config loading,
//! mutual-TLS session setup, combined build/encode/publish helpers, and
//! inbound dispatch. It is a thin pass-through — all wire contracts live
//! in `thincloud-core`; connection management, delivery guarantees, and
//! retry policy belong to `rumqttc`.

pub mod client;
pub mod config;
pub mod dispatch;
