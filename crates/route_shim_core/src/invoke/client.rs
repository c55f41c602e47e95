use serde::{Deserialize, Serialize};

use crate::handler::HandlerError;

/// Whether the platform runs the target function inline or queues it.
///
/// Either way the local call blocks until the platform answers; only the
/// platform-side execution differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationMode {
    /// Wait for the function and return its payload.
    #[default]
    Synchronous,
    /// Queue the function; the platform acknowledges without a payload.
    FireAndForget,
}

impl InvocationMode {
    /// Name of the mode in the platform's invoke API.
    pub fn as_platform_str(self) -> &'static str {
        match self {
            Self::Synchronous => "RequestResponse",
            Self::FireAndForget => "Event",
        }
    }
}

/// Descriptor for one invocation.
///
/// A descriptor configured at registration time is shared by every request
/// routed to its handler, so it is never written to after construction: each
/// call fills `payload` on its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeInput {
    /// Function name, partial ARN or full ARN.
    pub function_name: String,
    pub mode: InvocationMode,
    /// Version or alias to invoke.
    pub qualifier: Option<String>,
    /// Pre-serialized payload. When set it is sent as is instead of the
    /// serialized request.
    pub payload: Option<Vec<u8>>,
}

impl InvokeInput {
    pub fn new(function_name: impl Into<String>, mode: InvocationMode) -> Self {
        Self {
            function_name: function_name.into(),
            mode,
            ..Self::default()
        }
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.qualifier = Some(qualifier.into());
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeOutput {
    pub status_code: i32,
    /// Function response; absent for fire-and-forget invocations.
    pub payload: Option<Vec<u8>>,
    /// Set by the platform when the function itself raised an error.
    pub function_error: Option<String>,
    pub executed_version: Option<String>,
}

/// Failure reported by a [`FunctionClient`].
#[derive(Debug)]
pub enum PlatformFailure {
    /// Structured platform error carrying the platform's error code.
    Coded { code: String, message: String },
    /// Anything the platform did not describe with a code (connection,
    /// timeout, malformed response).
    Transport(HandlerError),
}

impl PlatformFailure {
    pub fn coded(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Coded {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn transport(error: impl Into<HandlerError>) -> Self {
        Self::Transport(error.into())
    }
}

/// Session with the remote compute platform. One `invoke` is one outbound call.
pub trait FunctionClient: Send + Sync {
    fn invoke(&self, input: &InvokeInput) -> Result<InvokeOutput, PlatformFailure>;
}
