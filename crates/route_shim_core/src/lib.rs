//! Route dispatch and remote function invocation for gateway events.
//!
//! This crate owns the request model, the route table, the remote invoker and
//! its error classification, and status tagging of errors. It intentionally
//! excludes AWS SDK and Lambda runtime concerns; those live in
//! `route_shim_lambda`.

pub mod handler;
pub mod invoke;
pub mod request;
pub mod router;
pub mod status;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use handler::{Handler, HandlerError, Reply};
pub use invoke::{
    FunctionClient, InvocationMode, InvokeError, InvokeInput, InvokeOutput, PlatformErrorKind,
    PlatformFailure, RemoteInvoker, SimpleInvoker,
};
pub use request::Request;
pub use router::{DispatchError, RouteTable, Router};
pub use status::{http_error, http_error_msg, status_text, StatusError};
