//! Envelope marshaling.
//!
//! Each builder serializes one fixed envelope shape into a caller-provided
//! buffer and returns the byte length written. Structured `body`/`params`
//! values are taken by value: embedding transfers them into the outgoing
//! envelope, which is released as a unit when the call returns.

use serde::Serialize;
use serde_json::Value;

use crate::buffer::copy_into;
use crate::error::{Result, ThinCloudError};

/// One-of response status: a success result or an error object.
///
/// `statusCode` is always present on the wire. `body` and `message` are
/// omitted entirely when unset.
#[derive(Debug, Serialize)]
pub enum ResponseStatus {
    #[serde(rename = "result")]
    Success {
        #[serde(rename = "statusCode")]
        status_code: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },
    #[serde(rename = "error")]
    Error {
        #[serde(rename = "statusCode")]
        status_code: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

#[derive(Serialize)]
struct CommissioningData<'a> {
    #[serde(rename = "deviceType")]
    device_type: &'a str,
    #[serde(rename = "physicalId")]
    physical_id: &'a str,
}

#[derive(Serialize)]
struct CommissioningParams<'a> {
    data: CommissioningData<'a>,
}

#[derive(Serialize)]
struct CommissioningRequestWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    method: &'static str,
    params: [CommissioningParams<'a>; 1],
}

#[derive(Serialize)]
struct CommandResponseWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(flatten)]
    status: ResponseStatus,
}

#[derive(Serialize)]
struct ServiceRequestWire<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

fn write_envelope<T: Serialize>(buf: &mut [u8], wire: &T) -> Result<usize> {
    let s = serde_json::to_string(wire)
        .map_err(|e| ThinCloudError::Parse(format!("envelope serialization failed: {e}")))?;
    copy_into(buf, &s)
}

/// Marshal a commissioning request:
/// `{"id"?,"method":"commission","params":[{"data":{"deviceType":…,"physicalId":…}}]}`.
pub fn commissioning_request(
    buf: &mut [u8],
    request_id: Option<&str>,
    device_type: &str,
    physical_id: &str,
) -> Result<usize> {
    if device_type.is_empty() {
        return Err(ThinCloudError::MissingValue("deviceType"));
    }
    if physical_id.is_empty() {
        return Err(ThinCloudError::MissingValue("physicalId"));
    }
    let wire = CommissioningRequestWire {
        id: request_id,
        method: "commission",
        params: [CommissioningParams {
            data: CommissioningData {
                device_type,
                physical_id,
            },
        }],
    };
    write_envelope(buf, &wire)
}

/// Marshal a command response: `{"id"?,"result":{…}}` or `{"id"?,"error":{…}}`.
pub fn command_response(
    buf: &mut [u8],
    request_id: Option<&str>,
    status: ResponseStatus,
) -> Result<usize> {
    let wire = CommandResponseWire {
        id: request_id,
        status,
    };
    write_envelope(buf, &wire)
}

/// Marshal a service request: `{"id"?,"method":…,"params"?}`.
pub fn service_request(
    buf: &mut [u8],
    request_id: Option<&str>,
    method: &str,
    params: Option<Value>,
) -> Result<usize> {
    if method.is_empty() {
        return Err(ThinCloudError::MissingValue("method"));
    }
    let wire = ServiceRequestWire {
        id: request_id,
        method,
        params,
    };
    write_envelope(buf, &wire)
}
