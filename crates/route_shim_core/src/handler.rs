use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::request::Request;

/// Error type returned by handlers. Same shape as `lambda_runtime::Error`, so
/// handler failures can be handed to the runtime without conversion.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque result of a handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A JSON document built by an application handler.
    Value(Value),
    /// Bytes returned verbatim by a synchronous remote invocation.
    Raw(Vec<u8>),
    /// Acknowledgement without a payload (fire-and-forget invocation).
    Empty,
}

impl Reply {
    pub fn json(value: impl Serialize) -> Result<Self, HandlerError> {
        Ok(Self::Value(serde_json::to_value(value)?))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Interpret the reply as a JSON document. Raw bytes that are not JSON
    /// become a string; `Empty` becomes `null`.
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) => value,
            Self::Raw(bytes) => serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
            Self::Empty => Value::Null,
        }
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl Serialize for Reply {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Raw(_) => self.clone().into_value().serialize(serializer),
            Self::Empty => serializer.serialize_unit(),
        }
    }
}

/// Capability registered in a route table: accepts a request, produces a
/// reply or a failure.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request) -> Result<Reply, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Result<Reply, HandlerError> + Send + Sync,
{
    fn handle(&self, request: &Request) -> Result<Reply, HandlerError> {
        self(request)
    }
}
