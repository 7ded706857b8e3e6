//! Envelope extraction (lenient).
//!
//! Decoders are strict about top-level syntax and lenient about fields:
//! anything absent or of an unexpected JSON shape is left at its default,
//! never escalated to an error. An empty payload decodes to an all-default
//! value so callers treat "no payload" uniformly with "nothing extracted".
//!
//! Every structured value in the output is an owned copy, independent of
//! the parse buffer; callers may mutate or drop it freely.

use serde_json::Value;

use crate::error::{Result, ThinCloudError};

/// Decoded commissioning response fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommissioningResponse {
    /// ID of the original commissioning request.
    pub request_id: Option<String>,
    /// Commissioning status; 0 when the response carried none.
    pub status_code: u16,
    /// Device ID assigned by the cloud.
    pub device_id: Option<String>,
}

/// Decoded command request fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandRequest {
    pub request_id: Option<String>,
    pub method: Option<String>,
    /// Command parameters, owned by the caller.
    pub params: Option<Value>,
}

/// Decoded service response fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceResponse {
    pub request_id: Option<String>,
    /// Request status; 0 when the response carried none.
    pub status_code: u16,
    /// Response body, owned by the caller.
    pub body: Option<Value>,
}

fn parse_payload(payload: &[u8]) -> Result<Option<Value>> {
    if payload.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(payload)
        .map(Some)
        .map_err(|e| ThinCloudError::Parse(format!("invalid envelope json: {e}")))
}

fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn status_code_field(result: &Value) -> u16 {
    result
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|v| u16::try_from(v).ok())
        .unwrap_or(0)
}

/// Unmarshal a commissioning response payload.
pub fn commissioning_response(payload: &[u8]) -> Result<CommissioningResponse> {
    let mut out = CommissioningResponse::default();
    let Some(doc) = parse_payload(payload)? else {
        return Ok(out);
    };
    out.request_id = string_field(&doc, "id");
    if let Some(result) = doc.get("result") {
        out.status_code = status_code_field(result);
        out.device_id = string_field(result, "deviceId");
    }
    Ok(out)
}

/// Unmarshal a command request payload.
pub fn command_request(payload: &[u8]) -> Result<CommandRequest> {
    let mut out = CommandRequest::default();
    let Some(doc) = parse_payload(payload)? else {
        return Ok(out);
    };
    out.request_id = string_field(&doc, "id");
    out.method = string_field(&doc, "method");
    out.params = doc.get("params").cloned();
    Ok(out)
}

/// Unmarshal a service response payload.
pub fn service_response(payload: &[u8]) -> Result<ServiceResponse> {
    let mut out = ServiceResponse::default();
    let Some(doc) = parse_payload(payload)? else {
        return Ok(out);
    };
    out.request_id = string_field(&doc, "id");
    if let Some(result) = doc.get("result") {
        out.status_code = status_code_field(result);
        out.body = result.get("body").cloned();
    }
    Ok(out)
}
