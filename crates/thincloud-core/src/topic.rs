//! ThinCloud topic construction.
//!
//! Topics are fixed path shapes over caller-supplied identifiers:
//! - commissioning: `thincloud/registration/{deviceType}_{physicalId}/requests[/{requestId}/response]`
//! - commands: `thincloud/devices/{deviceId}/command[/{commandId}/response]`
//! - service requests: `thincloud/devices/{deviceId}/requests[/{requestId}/response]`
//!
//! Builders write UTF-8 bytes into a caller-provided slice and return the
//! written length. Identifiers are embedded verbatim — no escaping or
//! validation beyond non-emptiness. Callers own the boundary: identifiers
//! must not contain `/` and are expected to fit [`ID_LENGTH`].

use crate::buffer::copy_into;
use crate::error::{Result, ThinCloudError};

/// UUID standard length plus terminator slot.
pub const ID_LENGTH: usize = 37;

/// Broker topic length ceiling plus terminator slot. Destination buffers
/// sized to this constant can hold any well-formed topic.
pub const MAX_TOPIC_LENGTH: usize = 257;

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(ThinCloudError::MissingValue(field));
    }
    Ok(value)
}

/// Build a commission request topic:
/// `thincloud/registration/{deviceType}_{physicalId}/requests`.
pub fn commission_request_topic(
    buf: &mut [u8],
    device_type: &str,
    physical_id: &str,
) -> Result<usize> {
    let device_type = required(device_type, "deviceType")?;
    let physical_id = required(physical_id, "physicalId")?;
    copy_into(
        buf,
        &format!("thincloud/registration/{device_type}_{physical_id}/requests"),
    )
}

/// Build a commission response topic:
/// `thincloud/registration/{deviceType}_{physicalId}/requests/{requestId}/response`.
pub fn commission_response_topic(
    buf: &mut [u8],
    device_type: &str,
    physical_id: &str,
    request_id: &str,
) -> Result<usize> {
    let device_type = required(device_type, "deviceType")?;
    let physical_id = required(physical_id, "physicalId")?;
    let request_id = required(request_id, "requestId")?;
    copy_into(
        buf,
        &format!("thincloud/registration/{device_type}_{physical_id}/requests/{request_id}/response"),
    )
}

/// Build a command request topic: `thincloud/devices/{deviceId}/command`.
pub fn command_request_topic(buf: &mut [u8], device_id: &str) -> Result<usize> {
    let device_id = required(device_id, "deviceId")?;
    copy_into(buf, &format!("thincloud/devices/{device_id}/command"))
}

/// Build a command response topic:
/// `thincloud/devices/{deviceId}/command/{commandId}/response`.
pub fn command_response_topic(
    buf: &mut [u8],
    device_id: &str,
    command_id: &str,
) -> Result<usize> {
    let device_id = required(device_id, "deviceId")?;
    let command_id = required(command_id, "commandId")?;
    copy_into(
        buf,
        &format!("thincloud/devices/{device_id}/command/{command_id}/response"),
    )
}

/// Build a service request topic: `thincloud/devices/{deviceId}/requests`.
pub fn service_request_topic(buf: &mut [u8], device_id: &str) -> Result<usize> {
    let device_id = required(device_id, "deviceId")?;
    copy_into(buf, &format!("thincloud/devices/{device_id}/requests"))
}

/// Build a service response topic:
/// `thincloud/devices/{deviceId}/requests/{requestId}/response`.
pub fn service_response_topic(
    buf: &mut [u8],
    device_id: &str,
    request_id: &str,
) -> Result<usize> {
    let device_id = required(device_id, "deviceId")?;
    let request_id = required(request_id, "requestId")?;
    copy_into(
        buf,
        &format!("thincloud/devices/{device_id}/requests/{request_id}/response"),
    )
}
