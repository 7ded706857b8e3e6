//! Envelope codec vectors: exact wire bytes on encode, lenient extraction
//! on decode.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::json;

use thincloud_core::envelope::{self, ResponseStatus, REQUEST_METHOD_GET};
use thincloud_core::error::ErrorCode;

const CAP: usize = 512;

fn written(buf: &[u8], len: usize) -> &str {
    std::str::from_utf8(&buf[..len]).unwrap()
}

// --------------------
// Encoding
// --------------------

#[test]
fn builds_commissioning_request() {
    let mut buf = [0u8; CAP];
    let len = envelope::commissioning_request(&mut buf, Some("1234"), "lock", "5678").unwrap();

    let expected =
        r#"{"id":"1234","method":"commission","params":[{"data":{"deviceType":"lock","physicalId":"5678"}}]}"#;
    assert_eq!(written(&buf, len), expected);
    assert_eq!(len, expected.len());
}

#[test]
fn omits_commissioning_request_id_when_absent() {
    let mut buf = [0u8; CAP];
    let len = envelope::commissioning_request(&mut buf, None, "lock", "5678").unwrap();

    assert_eq!(
        written(&buf, len),
        r#"{"method":"commission","params":[{"data":{"deviceType":"lock","physicalId":"5678"}}]}"#
    );
}

#[test]
fn fails_commissioning_request_on_empty_identity() {
    let mut buf = [0u8; CAP];

    let err = envelope::commissioning_request(&mut buf, Some("1234"), "", "5678").unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingValue);

    let err = envelope::commissioning_request(&mut buf, None, "lock", "").unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingValue);
}

#[test]
fn builds_command_response() {
    let mut buf = [0u8; CAP];
    let status = ResponseStatus::Success {
        status_code: 200,
        body: Some(json!({"foo": "bar"})),
    };
    let len = envelope::command_response(&mut buf, Some("1234"), status).unwrap();

    let expected = r#"{"id":"1234","result":{"statusCode":200,"body":{"foo":"bar"}}}"#;
    assert_eq!(written(&buf, len), expected);
    assert_eq!(len, expected.len());
}

#[test]
fn builds_command_response_without_body_or_id() {
    let mut buf = [0u8; CAP];
    let status = ResponseStatus::Success {
        status_code: 204,
        body: None,
    };
    let len = envelope::command_response(&mut buf, None, status).unwrap();

    assert_eq!(written(&buf, len), r#"{"result":{"statusCode":204}}"#);
}

#[test]
fn builds_command_error_response() {
    let mut buf = [0u8; CAP];
    let status = ResponseStatus::Error {
        status_code: 500,
        message: Some("device busy".to_string()),
    };
    let len = envelope::command_response(&mut buf, Some("1234"), status).unwrap();

    assert_eq!(
        written(&buf, len),
        r#"{"id":"1234","error":{"statusCode":500,"message":"device busy"}}"#
    );
}

#[test]
fn omits_command_error_message_when_absent() {
    let mut buf = [0u8; CAP];
    let status = ResponseStatus::Error {
        status_code: 500,
        message: None,
    };
    let len = envelope::command_response(&mut buf, None, status).unwrap();

    assert_eq!(written(&buf, len), r#"{"error":{"statusCode":500}}"#);
}

#[test]
fn builds_service_request() {
    let mut buf = [0u8; CAP];
    let len = envelope::service_request(
        &mut buf,
        Some("1234"),
        REQUEST_METHOD_GET,
        Some(json!({"foo": "bar"})),
    )
    .unwrap();

    let expected = r#"{"id":"1234","method":"GET","params":{"foo":"bar"}}"#;
    assert_eq!(written(&buf, len), expected);
    assert_eq!(len, expected.len());
}

#[test]
fn builds_service_request_without_params() {
    let mut buf = [0u8; CAP];
    let len = envelope::service_request(&mut buf, Some("1234"), "reboot", None).unwrap();

    assert_eq!(written(&buf, len), r#"{"id":"1234","method":"reboot"}"#);
}

#[test]
fn fails_service_request_on_empty_method() {
    let mut buf = [0u8; CAP];
    let err = envelope::service_request(&mut buf, Some("1234"), "", None).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingValue);
}

#[test]
fn reports_undersized_payload_buffer() {
    let mut buf = [0u8; 16];
    let status = ResponseStatus::Success {
        status_code: 200,
        body: Some(json!({"foo": "bar"})),
    };
    let err = envelope::command_response(&mut buf, Some("1234"), status).unwrap_err();
    assert_eq!(err.code(), ErrorCode::BufferTooSmall);
}

// --------------------
// Decoding
// --------------------

#[test]
fn processes_commissioning_response() {
    let payload = br#"{"id":"1234","result":{"statusCode":200,"deviceId":"5678"}}"#;
    let resp = envelope::commissioning_response(payload).unwrap();

    assert_eq!(resp.request_id.as_deref(), Some("1234"));
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.device_id.as_deref(), Some("5678"));
}

#[test]
fn tolerates_commissioning_response_without_result() {
    let resp = envelope::commissioning_response(br#"{"id":"1234"}"#).unwrap();

    assert_eq!(resp.request_id.as_deref(), Some("1234"));
    assert_eq!(resp.status_code, 0);
    assert!(resp.device_id.is_none());
}

#[test]
fn processes_command_request() {
    let payload = br#"{"id":"1234","method":"startRoutine","params":[{"data":{"foo":"bar"}}]}"#;
    let req = envelope::command_request(payload).unwrap();

    assert_eq!(req.request_id.as_deref(), Some("1234"));
    assert_eq!(req.method.as_deref(), Some("startRoutine"));

    let params = req.params.unwrap();
    assert_eq!(params[0]["data"]["foo"], "bar");
}

#[test]
fn processes_service_response() {
    let payload = br#"{"id":"1234","result":{"statusCode":200,"body":{"foo":"bar"}}}"#;
    let resp = envelope::service_response(payload).unwrap();

    assert_eq!(resp.request_id.as_deref(), Some("1234"));
    assert_eq!(resp.status_code, 200);
    assert_eq!(resp.body.unwrap()["foo"], "bar");
}

#[test]
fn empty_payload_decodes_to_defaults() {
    let resp = envelope::commissioning_response(b"").unwrap();
    assert_eq!(resp, envelope::CommissioningResponse::default());

    let req = envelope::command_request(b"").unwrap();
    assert_eq!(req, envelope::CommandRequest::default());

    let resp = envelope::service_response(b"").unwrap();
    assert_eq!(resp, envelope::ServiceResponse::default());
}

#[test]
fn malformed_payload_is_a_parse_error() {
    let err = envelope::commissioning_response(b"{not json").unwrap_err();
    assert_eq!(err.code(), ErrorCode::Parse);

    let err = envelope::command_request(b"{not json").unwrap_err();
    assert_eq!(err.code(), ErrorCode::Parse);

    let err = envelope::service_response(b"{not json").unwrap_err();
    assert_eq!(err.code(), ErrorCode::Parse);
}

#[test]
fn skips_fields_of_unexpected_shape() {
    // Numeric id and string statusCode are ignored, not errors.
    let payload = br#"{"id":1234,"result":{"statusCode":"200","deviceId":["5678"]}}"#;
    let resp = envelope::commissioning_response(payload).unwrap();

    assert!(resp.request_id.is_none());
    assert_eq!(resp.status_code, 0);
    assert!(resp.device_id.is_none());
}

#[test]
fn decoded_params_are_an_independent_copy() {
    let payload = br#"{"id":"1","params":[{"data":{"foo":"bar"}}]}"#;
    let first = envelope::command_request(payload).unwrap();
    let second = envelope::command_request(payload).unwrap();

    let mut params = first.params.unwrap();
    params[0]["data"]["foo"] = serde_json::Value::from("mutated");

    assert_eq!(second.params.unwrap()[0]["data"]["foo"], "bar");
}

// --------------------
// Round trips
// --------------------

#[test]
fn service_request_round_trips_through_command_decode() {
    let mut buf = [0u8; CAP];
    let params = json!([{"data": {"foo": "bar"}}]);
    let len =
        envelope::service_request(&mut buf, Some("1234"), "startRoutine", Some(params.clone()))
            .unwrap();

    let decoded = envelope::command_request(&buf[..len]).unwrap();
    assert_eq!(decoded.request_id.as_deref(), Some("1234"));
    assert_eq!(decoded.method.as_deref(), Some("startRoutine"));
    assert_eq!(decoded.params, Some(params));
}

#[test]
fn command_response_round_trips_through_service_decode() {
    let mut buf = [0u8; CAP];
    let status = ResponseStatus::Success {
        status_code: 200,
        body: Some(json!({"foo": "bar"})),
    };
    let len = envelope::command_response(&mut buf, Some("1234"), status).unwrap();

    let decoded = envelope::service_response(&buf[..len]).unwrap();
    assert_eq!(decoded.request_id.as_deref(), Some("1234"));
    assert_eq!(decoded.status_code, 200);
    assert_eq!(decoded.body, Some(json!({"foo": "bar"})));
}
