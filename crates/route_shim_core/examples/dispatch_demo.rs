//! Dispatch two gateway events through a router backed by a stub platform.
//!
//! Run with: cargo run -p route_shim_core --example dispatch_demo

use std::sync::Arc;

use route_shim_core::test_helpers::RecordingClient;
use route_shim_core::{
    http_error, HandlerError, InvocationMode, InvokeInput, RemoteInvoker, Reply, Request, Router,
};
use serde_json::json;

fn foo_handler(request: &Request) -> Result<Reply, HandlerError> {
    let Some(id) = request.path_param("fooID") else {
        return Err(http_error(400, "fooID is required".into()));
    };
    println!("handled foo: {id}");
    Reply::json(json!({ "id": id }))
}

fn main() {
    let platform = Arc::new(RecordingClient::new());

    let mut router = Router::new();
    router.set_handler("GET:/foo/{fooID}", foo_handler);
    router.set_handler(
        "GET:/bar/{barID}",
        RemoteInvoker::new(
            InvokeInput::new(
                "arn:aws:lambda:us-west-2:1234567890:function:bar",
                InvocationMode::FireAndForget,
            ),
            platform.clone(),
        ),
    );

    let events = [
        Request::new("GET:/foo/{fooID}").with_path_param("fooID", "foo1"),
        Request::new("GET:/bar/{barID}").with_path_param("barID", "bar2"),
        Request::new("GET:/baz/{bazID}").with_path_param("bazID", "baz3"),
    ];

    for event in &events {
        match router.route(event) {
            Ok(reply) => println!("{}: {}", event.route(), reply.into_value()),
            Err(error) => println!("{}: error: {error}", event.route()),
        }
    }

    println!("--- Platform calls: {} ---", platform.call_count());
    for call in platform.calls() {
        let payload = call
            .payload
            .as_deref()
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        println!("{} ({:?}): {payload}", call.function_name, call.mode);
    }
}
