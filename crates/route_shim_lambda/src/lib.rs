//! AWS-oriented adapters and the gateway shim runtime.
//!
//! This crate owns runtime integration details (the Lambda invoke client, the
//! route manifest, and gateway event handling). Dispatch and invocation
//! semantics live in `route_shim_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
