use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type PathParams = BTreeMap<String, String>;
pub type QueryParams = BTreeMap<String, String>;

/// One inbound gateway event, already resolved to a route key.
///
/// The gateway mapping template produces the four wire fields `body`, `path`,
/// `querystring` and `route`. Sections the gateway left out (or sent as
/// `null`) decode to empty maps. The route key is fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, deserialize_with = "null_as_default")]
    body: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    path: PathParams,
    #[serde(default, deserialize_with = "null_as_default")]
    querystring: QueryParams,
    #[serde(default)]
    route: String,
}

impl Request {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
            ..Self::default()
        }
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.querystring.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    pub fn with_body_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(name.into(), value.into());
        self
    }

    /// Route key used for dispatch, e.g. `GET:/foo/{fooID}`.
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn path(&self) -> &PathParams {
        &self.path
    }

    pub fn querystring(&self) -> &QueryParams {
        &self.querystring
    }

    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.path.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.querystring.get(name).map(String::as_str)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
