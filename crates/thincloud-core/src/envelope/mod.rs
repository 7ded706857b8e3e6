//! Request/response envelope codec (JSON).
//!
//! Envelopes are JSON-RPC-like: an optional `id` plus either a
//! `method`/`params` pair (request) or a one-of `result`/`error` object
//! (response). Encoders produce compact JSON with a fixed field order —
//! existing cloud consumers match on the exact byte sequence, so absent
//! optional fields are omitted, never written as `null`. Decoders are
//! strict about top-level syntax and lenient about individual fields.

pub mod decode;
pub mod encode;

pub use decode::{
    command_request, commissioning_response, service_response, CommandRequest,
    CommissioningResponse, ServiceResponse,
};
pub use encode::{command_response, commissioning_request, service_request, ResponseStatus};

/// Conventional service request verbs. The codec embeds any method string
/// verbatim; these are the values the cloud services recognize.
pub const REQUEST_METHOD_GET: &str = "GET";
pub const REQUEST_METHOD_PUT: &str = "PUT";
pub const REQUEST_METHOD_POST: &str = "POST";
pub const REQUEST_METHOD_DELETE: &str = "DELETE";
