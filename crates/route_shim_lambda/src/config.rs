//! Route manifest for the gateway shim.
//!
//! The manifest is a JSON object mapping route keys to invocation targets:
//!
//! ```json
//! {
//!   "GET:/bar/{barID}": "arn:aws:lambda:us-west-2:1234567890:function:bar",
//!   "POST:/orders": {
//!     "function_name": "orders",
//!     "invocation_mode": "synchronous",
//!     "qualifier": "live"
//!   }
//! }
//! ```
//!
//! A bare string registers a fire-and-forget [`SimpleInvoker`]; the object
//! form registers a [`RemoteInvoker`] with the given mode and qualifier.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use route_shim_core::{
    FunctionClient, InvocationMode, InvokeInput, RemoteInvoker, Router, SimpleInvoker,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ROUTES_ENV: &str = "ROUTE_SHIM_ROUTES";
pub const ROUTES_FILE_ENV: &str = "ROUTE_SHIM_ROUTES_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} or {} must be configured", ROUTES_ENV, ROUTES_FILE_ENV)]
    MissingManifest,
    #[error("failed to read route manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid route manifest: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("route manifest declares no routes")]
    Empty,
    #[error("route {route} has no function name")]
    MissingFunctionName { route: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteTarget {
    FunctionName(String),
    Invoke {
        function_name: String,
        #[serde(default)]
        invocation_mode: InvocationMode,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        qualifier: Option<String>,
    },
}

impl RouteTarget {
    pub fn function_name(&self) -> &str {
        match self {
            Self::FunctionName(function_name) | Self::Invoke { function_name, .. } => {
                function_name
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShimConfig {
    pub routes: BTreeMap<String, RouteTarget>,
}

impl ShimConfig {
    /// Load the manifest named by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Inline JSON in [`ROUTES_ENV`] takes precedence over a file named by
    /// [`ROUTES_FILE_ENV`]. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(inline) = non_blank(ROUTES_ENV) {
            return Self::from_json(&inline);
        }
        if let Some(path) = non_blank(ROUTES_FILE_ENV) {
            return Self::from_file(Path::new(path.trim()));
        }
        Err(ConfigError::MissingManifest)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.routes.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (route, target) in &self.routes {
            if target.function_name().trim().is_empty() {
                return Err(ConfigError::MissingFunctionName {
                    route: route.clone(),
                });
            }
        }
        Ok(())
    }

    /// Register one invoker per manifest route, all sharing `client`.
    pub fn build_router(&self, client: Arc<dyn FunctionClient>) -> Router {
        let mut router = Router::new();
        for (route, target) in &self.routes {
            match target {
                RouteTarget::FunctionName(function_name) => {
                    router.set_handler(
                        route.clone(),
                        SimpleInvoker::new(function_name.clone(), Arc::clone(&client)),
                    );
                }
                RouteTarget::Invoke {
                    function_name,
                    invocation_mode,
                    qualifier,
                } => {
                    let input = InvokeInput {
                        function_name: function_name.clone(),
                        mode: *invocation_mode,
                        qualifier: qualifier.clone(),
                        payload: None,
                    };
                    router.set_handler(route.clone(), RemoteInvoker::new(input, Arc::clone(&client)));
                }
            }
        }
        router
    }
}
