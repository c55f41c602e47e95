use std::sync::Arc;

use serde::Serialize;

use super::client::{FunctionClient, InvocationMode, InvokeInput, PlatformFailure};
use super::error::InvokeError;
use crate::handler::{Handler, HandlerError, Reply};
use crate::request::Request;

/// Handler that forwards the request to a remote function described by a
/// fixed [`InvokeInput`].
#[derive(Clone)]
pub struct RemoteInvoker {
    input: InvokeInput,
    client: Arc<dyn FunctionClient>,
}

impl RemoteInvoker {
    pub fn new(input: InvokeInput, client: Arc<dyn FunctionClient>) -> Self {
        Self { input, client }
    }

    pub fn input(&self) -> &InvokeInput {
        &self.input
    }

    /// Invoke the function with `value` as payload, unless the descriptor
    /// already carries one.
    pub fn invoke_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Reply, InvokeError> {
        ensure_function_name(&self.input.function_name)?;

        let mut input = self.input.clone();
        if input.payload.is_none() {
            input.payload = Some(marshal(value)?);
        }
        call(self.client.as_ref(), &input)
    }
}

impl Handler for RemoteInvoker {
    fn handle(&self, request: &Request) -> Result<Reply, HandlerError> {
        self.invoke_value(request).map_err(HandlerError::from)
    }
}

impl std::fmt::Debug for RemoteInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteInvoker")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

/// Fire-and-forget invoker configured by function name alone. The request is
/// always serialized as the payload.
#[derive(Clone)]
pub struct SimpleInvoker {
    function_name: String,
    client: Arc<dyn FunctionClient>,
}

impl SimpleInvoker {
    pub fn new(function_name: impl Into<String>, client: Arc<dyn FunctionClient>) -> Self {
        Self {
            function_name: function_name.into(),
            client,
        }
    }

    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    pub fn invoke_value<T: Serialize + ?Sized>(&self, value: &T) -> Result<Reply, InvokeError> {
        ensure_function_name(&self.function_name)?;
        let input = InvokeInput::new(self.function_name.clone(), InvocationMode::FireAndForget)
            .with_payload(marshal(value)?);
        call(self.client.as_ref(), &input)
    }
}

impl Handler for SimpleInvoker {
    fn handle(&self, request: &Request) -> Result<Reply, HandlerError> {
        self.invoke_value(request).map_err(HandlerError::from)
    }
}

impl std::fmt::Debug for SimpleInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleInvoker")
            .field("function_name", &self.function_name)
            .finish_non_exhaustive()
    }
}

fn ensure_function_name(function_name: &str) -> Result<(), InvokeError> {
    if function_name.trim().is_empty() {
        return Err(InvokeError::MissingFunctionName);
    }
    Ok(())
}

fn marshal<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, InvokeError> {
    serde_json::to_vec(value).map_err(InvokeError::Marshal)
}

fn call(client: &dyn FunctionClient, input: &InvokeInput) -> Result<Reply, InvokeError> {
    tracing::debug!(
        function_name = %input.function_name,
        mode = input.mode.as_platform_str(),
        "invoking function"
    );

    let output = client.invoke(input).map_err(|failure| match failure {
        PlatformFailure::Coded { code, message } => InvokeError::platform(code, message),
        PlatformFailure::Transport(error) => InvokeError::Transport(error),
    })?;

    match input.mode {
        InvocationMode::Synchronous => Ok(Reply::Raw(output.payload.unwrap_or_default())),
        InvocationMode::FireAndForget => Ok(Reply::Empty),
    }
}
