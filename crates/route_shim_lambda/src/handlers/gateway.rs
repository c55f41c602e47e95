use route_shim_core::{http_error, DispatchError, HandlerError, Request, Router};
use serde_json::Value;

/// Decode a gateway event, dispatch it, and render the reply as JSON.
///
/// Errors follow the gateway's status convention: an undecodable event is a
/// `[Bad Request]`, an unknown route a `[Not Found]`. Handler errors are
/// returned exactly as the handler produced them.
pub fn handle_gateway_event(router: &Router, event: Value) -> Result<Value, HandlerError> {
    let request: Request = serde_json::from_value(event).map_err(|error| {
        http_error(400, format!("malformed gateway event: {error}").into())
    })?;

    tracing::info!(route = request.route(), "gateway event received");

    match router.route(&request) {
        Ok(reply) => Ok(reply.into_value()),
        Err(miss @ DispatchError::NoMatchingRoute { .. }) => Err(http_error(404, Box::new(miss))),
        Err(DispatchError::Handler(error)) => Err(error),
    }
}
