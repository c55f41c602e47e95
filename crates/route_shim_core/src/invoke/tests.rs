use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::json;

use super::*;
use crate::handler::{Handler, Reply};
use crate::request::Request;
use crate::test_helpers::{RecordingClient, ScriptedResponse};

fn bar_request() -> Request {
    Request::new("GET:/bar/{barID}").with_path_param("barID", "bar2")
}

/// serde_json refuses maps whose keys are not strings.
fn unserializable() -> BTreeMap<(u8, u8), u8> {
    BTreeMap::from([((1, 2), 3)])
}

#[test]
fn missing_function_name_fails_before_any_call() {
    let client = Arc::new(RecordingClient::new());
    for name in ["", "   "] {
        let invoker = RemoteInvoker::new(
            InvokeInput::new(name, InvocationMode::FireAndForget),
            client.clone(),
        );
        let error = invoker
            .invoke_value(&bar_request())
            .expect_err("empty function name should fail");
        assert!(matches!(error, InvokeError::MissingFunctionName));
        assert_eq!(error.to_string(), "no function name given");
    }
    assert_eq!(client.call_count(), 0);
}

#[test]
fn fire_and_forget_returns_empty_reply() {
    let client = Arc::new(RecordingClient::new());
    let invoker = RemoteInvoker::new(
        InvokeInput::new("bar", InvocationMode::FireAndForget),
        client.clone(),
    );

    let reply = invoker.handle(&bar_request()).expect("invoke should succeed");

    assert_eq!(reply, Reply::Empty);
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function_name, "bar");
    assert_eq!(calls[0].mode, InvocationMode::FireAndForget);
    assert_eq!(
        client.payload_json(0),
        json!({
            "body": {},
            "path": {"barID": "bar2"},
            "querystring": {},
            "route": "GET:/bar/{barID}"
        })
    );
}

#[test]
fn synchronous_returns_raw_payload() {
    let client = Arc::new(RecordingClient::returning_payload(br#"{"id":"bar2"}"#.to_vec()));
    let invoker = RemoteInvoker::new(
        InvokeInput::new("bar", InvocationMode::Synchronous),
        client.clone(),
    );

    let reply = invoker.handle(&bar_request()).expect("invoke should succeed");

    assert_eq!(reply, Reply::Raw(br#"{"id":"bar2"}"#.to_vec()));
}

#[test]
fn synchronous_without_payload_returns_empty_bytes() {
    let client = Arc::new(RecordingClient::responding([ScriptedResponse::Output(
        InvokeOutput {
            status_code: 200,
            ..InvokeOutput::default()
        },
    )]));
    let invoker = RemoteInvoker::new(InvokeInput::new("bar", InvocationMode::Synchronous), client);

    assert_eq!(
        invoker.handle(&bar_request()).expect("invoke should succeed"),
        Reply::Raw(Vec::new())
    );
}

#[test]
fn supplied_payload_is_passed_through_without_serializing_input() {
    let client = Arc::new(RecordingClient::new());
    let payload = b"\x00 not json at all \xff".to_vec();
    let invoker = RemoteInvoker::new(
        InvokeInput::new("bar", InvocationMode::FireAndForget).with_payload(payload.clone()),
        client.clone(),
    );

    invoker
        .invoke_value(&unserializable())
        .expect("preset payload should skip serialization");

    assert_eq!(client.calls()[0].payload.as_deref(), Some(payload.as_slice()));
}

#[test]
fn marshal_failure_is_reported_without_calling_platform() {
    let client = Arc::new(RecordingClient::new());
    let invoker = RemoteInvoker::new(
        InvokeInput::new("bar", InvocationMode::Synchronous),
        client.clone(),
    );

    let error = invoker
        .invoke_value(&unserializable())
        .expect_err("tuple keys cannot be encoded");

    assert!(matches!(error, InvokeError::Marshal(_)));
    assert!(error.to_string().starts_with("input failed to marshal: "));
    assert_eq!(client.call_count(), 0);
}

#[test]
fn shared_descriptor_is_never_mutated_between_requests() {
    let client = Arc::new(RecordingClient::new());
    let invoker = RemoteInvoker::new(
        InvokeInput::new("bar", InvocationMode::FireAndForget).with_qualifier("live"),
        client.clone(),
    );

    let first = Request::new("GET:/bar/{barID}").with_path_param("barID", "one");
    let second = Request::new("GET:/bar/{barID}").with_path_param("barID", "two");
    invoker.handle(&first).expect("first call");
    invoker.handle(&second).expect("second call");

    assert!(invoker.input().payload.is_none());
    assert_eq!(client.payload_json(0)["path"]["barID"], "one");
    assert_eq!(client.payload_json(1)["path"]["barID"], "two");
    assert!(client
        .calls()
        .iter()
        .all(|call| call.qualifier.as_deref() == Some("live")));
}

#[test]
fn every_known_code_is_classified_with_code_prefixed_message() {
    for (code, kind) in PLATFORM_ERROR_CODES {
        let client = Arc::new(RecordingClient::failing_with_code(code, "detail text"));
        let invoker = RemoteInvoker::new(InvokeInput::new("bar", InvocationMode::Synchronous), client);

        let error = invoker
            .invoke_value(&bar_request())
            .expect_err("coded failure should surface");

        assert_eq!(error.platform_kind(), Some(*kind));
        assert_eq!(error.platform_code(), Some(*code));
        assert_eq!(error.to_string(), format!("{code}: detail text"));
    }
}

#[test]
fn representative_codes_map_to_expected_kinds() {
    assert_eq!(
        classify_platform_code("ServiceException"),
        PlatformErrorKind::ServiceUnavailable
    );
    assert_eq!(
        classify_platform_code("TooManyRequestsException"),
        PlatformErrorKind::TooManyRequests
    );
    assert_eq!(
        classify_platform_code("RequestTooLargeException"),
        PlatformErrorKind::RequestTooLarge
    );
    assert_eq!(
        classify_platform_code("KMSNotFoundException"),
        PlatformErrorKind::Encryption
    );
}

#[test]
fn unknown_code_falls_into_unclassified_bucket() {
    let client = Arc::new(RecordingClient::failing_with_code(
        "SnapStartTimeoutException",
        "snapshot restore timed out",
    ));
    let invoker = RemoteInvoker::new(InvokeInput::new("bar", InvocationMode::Synchronous), client);

    let error = invoker
        .invoke_value(&bar_request())
        .expect_err("coded failure should surface");

    assert_eq!(error.platform_kind(), Some(PlatformErrorKind::Unclassified));
    assert_eq!(
        error.to_string(),
        "SnapStartTimeoutException: snapshot restore timed out"
    );
}

#[test]
fn transport_failure_is_returned_verbatim() {
    let client = Arc::new(RecordingClient::failing_in_transport(
        "dispatch failure: connection refused",
    ));
    let invoker = RemoteInvoker::new(
        InvokeInput::new("bar", InvocationMode::FireAndForget),
        client,
    );

    let error = invoker
        .invoke_value(&bar_request())
        .expect_err("transport failure should surface");

    assert!(matches!(error, InvokeError::Transport(_)));
    assert_eq!(error.platform_kind(), None);
    assert_eq!(error.to_string(), "dispatch failure: connection refused");
}

#[test]
fn handler_errors_downcast_to_invoke_error() {
    let client = Arc::new(RecordingClient::failing_with_code(
        "ResourceNotFoundException",
        "Function not found: bar",
    ));
    let invoker = RemoteInvoker::new(InvokeInput::new("bar", InvocationMode::Synchronous), client);

    let error = invoker.handle(&bar_request()).expect_err("should fail");
    let invoke_error = error
        .downcast_ref::<InvokeError>()
        .expect("handler error should be an InvokeError");
    assert_eq!(
        invoke_error.platform_kind(),
        Some(PlatformErrorKind::ResourceNotFound)
    );
}

#[test]
fn simple_invoker_always_fires_and_forgets_with_serialized_request() {
    let client = Arc::new(RecordingClient::new());
    let invoker = SimpleInvoker::new("arn:aws:lambda:us-west-2:1234567890:function:bar", client.clone());

    let reply = invoker.handle(&bar_request()).expect("invoke should succeed");

    assert_eq!(reply, Reply::Empty);
    let calls = client.calls();
    assert_eq!(calls[0].mode, InvocationMode::FireAndForget);
    assert_eq!(calls[0].qualifier, None);
    assert_eq!(
        calls[0].function_name,
        "arn:aws:lambda:us-west-2:1234567890:function:bar"
    );
    assert_eq!(client.payload_json(0)["route"], "GET:/bar/{barID}");
}

#[test]
fn simple_invoker_shares_failure_classes() {
    let client = Arc::new(RecordingClient::failing_with_code(
        "TooManyRequestsException",
        "Rate exceeded",
    ));
    let missing = SimpleInvoker::new("", client.clone());
    assert!(matches!(
        missing.invoke_value(&bar_request()),
        Err(InvokeError::MissingFunctionName)
    ));
    assert!(matches!(
        missing.invoke_value(&unserializable()),
        Err(InvokeError::MissingFunctionName)
    ));

    let named = SimpleInvoker::new("bar", client.clone());
    assert!(matches!(
        named.invoke_value(&unserializable()),
        Err(InvokeError::Marshal(_))
    ));
    let error = named
        .invoke_value(&bar_request())
        .expect_err("throttled call should fail");
    assert_eq!(error.platform_kind(), Some(PlatformErrorKind::TooManyRequests));
    assert_eq!(error.to_string(), "TooManyRequestsException: Rate exceeded");
    assert_eq!(client.call_count(), 1);
}

#[test]
fn invocation_mode_maps_to_platform_names() {
    assert_eq!(InvocationMode::Synchronous.as_platform_str(), "RequestResponse");
    assert_eq!(InvocationMode::FireAndForget.as_platform_str(), "Event");
    assert_eq!(InvocationMode::default(), InvocationMode::Synchronous);
}
