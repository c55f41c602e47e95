//! Status tagging for errors surfaced through the gateway.
//!
//! The gateway's integration responses select an HTTP status by matching the
//! error message against `^\[<Reason Phrase>\].*`, so a handler that wants a
//! 404 wraps its error with [`http_error`] before returning it.

use http::StatusCode;
use thiserror::Error;

use crate::handler::HandlerError;

/// An error tagged with an HTTP status: `[<Reason>] <message>`.
#[derive(Debug, Error)]
#[error("[{reason}] {source}")]
pub struct StatusError {
    status: StatusCode,
    reason: &'static str,
    #[source]
    source: HandlerError,
}

impl StatusError {
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }

    pub fn into_inner(self) -> HandlerError {
        self.source
    }
}

/// Standard reason phrase for `code`, if it has one.
pub fn status_text(code: u16) -> Option<&'static str> {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
}

/// Tag `error` with the reason phrase of `code`.
///
/// Codes without a standard reason phrase return `error` unchanged; this never
/// fails.
pub fn http_error(code: u16, error: HandlerError) -> HandlerError {
    match StatusCode::from_u16(code) {
        Ok(status) => match status.canonical_reason() {
            Some(reason) => Box::new(StatusError {
                status,
                reason,
                source: error,
            }),
            None => error,
        },
        Err(_) => error,
    }
}

/// Convenience for building a tagged error straight from a message.
pub fn http_error_msg(code: u16, message: impl Into<String>) -> HandlerError {
    let message: String = message.into();
    http_error(code, message.into())
}
