//! Remote function invocation as a route handler.
//!
//! [`RemoteInvoker`] turns a request into exactly one call on a
//! [`FunctionClient`] and translates coded platform failures into
//! [`InvokeError::Platform`]. The client is supplied by the caller, so the
//! invoker holds no session of its own and can be exercised without network
//! access. Nothing here retries.

mod client;
mod error;
mod invoker;

pub use client::{FunctionClient, InvocationMode, InvokeInput, InvokeOutput, PlatformFailure};
pub use error::{classify_platform_code, InvokeError, PlatformErrorKind, PLATFORM_ERROR_CODES};
pub use invoker::{RemoteInvoker, SimpleInvoker};

#[cfg(test)]
mod tests;
