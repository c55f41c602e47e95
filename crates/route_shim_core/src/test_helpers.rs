//! Test helpers shared by unit and integration tests.
//!
//! [`RecordingClient`] stands in for the remote platform: it records every
//! descriptor it receives and answers from a script.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::invoke::{FunctionClient, InvocationMode, InvokeInput, InvokeOutput, PlatformFailure};

/// Scripted answer for one call.
#[derive(Debug)]
pub enum ScriptedResponse {
    Output(InvokeOutput),
    Coded { code: String, message: String },
    Transport(String),
}

/// Fake [`FunctionClient`] that records calls.
///
/// With an empty script every call is acknowledged: status 202 and no payload
/// for fire-and-forget, status 200 and `{}` otherwise.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<InvokeInput>>,
    script: Mutex<VecDeque<ScriptedResponse>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responding(responses: impl IntoIterator<Item = ScriptedResponse>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            script: Mutex::new(responses.into_iter().collect()),
        }
    }

    pub fn returning_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self::responding([ScriptedResponse::Output(InvokeOutput {
            status_code: 200,
            payload: Some(payload.into()),
            ..InvokeOutput::default()
        })])
    }

    pub fn failing_with_code(code: &str, message: &str) -> Self {
        Self::responding([ScriptedResponse::Coded {
            code: code.to_string(),
            message: message.to_string(),
        }])
    }

    pub fn failing_in_transport(message: &str) -> Self {
        Self::responding([ScriptedResponse::Transport(message.to_string())])
    }

    pub fn calls(&self) -> Vec<InvokeInput> {
        self.calls.lock().expect("poisoned mutex").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("poisoned mutex").len()
    }

    /// Payload of the `index`th call, decoded as JSON.
    pub fn payload_json(&self, index: usize) -> serde_json::Value {
        let calls = self.calls();
        let payload = calls[index]
            .payload
            .as_deref()
            .expect("recorded call should carry a payload");
        serde_json::from_slice(payload).expect("recorded payload should be JSON")
    }
}

impl FunctionClient for RecordingClient {
    fn invoke(&self, input: &InvokeInput) -> Result<InvokeOutput, PlatformFailure> {
        self.calls
            .lock()
            .expect("poisoned mutex")
            .push(input.clone());

        let scripted = self.script.lock().expect("poisoned mutex").pop_front();
        match scripted {
            Some(ScriptedResponse::Output(output)) => Ok(output),
            Some(ScriptedResponse::Coded { code, message }) => {
                Err(PlatformFailure::coded(code, message))
            }
            Some(ScriptedResponse::Transport(message)) => Err(PlatformFailure::transport(message)),
            None => Ok(acknowledgement(input)),
        }
    }
}

fn acknowledgement(input: &InvokeInput) -> InvokeOutput {
    match input.mode {
        InvocationMode::FireAndForget => InvokeOutput {
            status_code: 202,
            ..InvokeOutput::default()
        },
        InvocationMode::Synchronous => InvokeOutput {
            status_code: 200,
            payload: Some(b"{}".to_vec()),
            ..InvokeOutput::default()
        },
    }
}
