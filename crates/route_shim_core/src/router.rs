use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::handler::{Handler, HandlerError, Reply};
use crate::request::Request;

/// Route key to handler mapping. Lookups are exact string matches.
pub type RouteTable = HashMap<String, Arc<dyn Handler>>;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{route}: no matching route")]
    NoMatchingRoute { route: String },
    /// Failure returned by the matched handler, passed through untouched.
    #[error(transparent)]
    Handler(HandlerError),
}

impl DispatchError {
    pub fn is_no_matching_route(&self) -> bool {
        matches!(self, Self::NoMatchingRoute { .. })
    }

    /// Recover the handler's own error; a routing miss is boxed as is.
    pub fn into_handler_error(self) -> HandlerError {
        match self {
            Self::Handler(error) => error,
            miss @ Self::NoMatchingRoute { .. } => Box::new(miss),
        }
    }
}

/// Delegates each request to the handler registered for its route key.
///
/// The table is expected to be fully populated before requests are dispatched
/// concurrently; `set_handler` takes `&mut self`, so sharing a `Router` across
/// threads freezes it.
#[derive(Clone, Default)]
pub struct Router {
    /// Public for bulk assignment; equivalent to calling `set_handler` per entry.
    pub handlers: RouteTable,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(handlers: RouteTable) -> Self {
        Self { handlers }
    }

    /// Register `handler` for `route`, replacing and returning any previous one.
    pub fn set_handler(
        &mut self,
        route: impl Into<String>,
        handler: impl Handler + 'static,
    ) -> Option<Arc<dyn Handler>> {
        self.handlers.insert(route.into(), Arc::new(handler))
    }

    pub fn contains_route(&self, route: &str) -> bool {
        self.handlers.contains_key(route)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch(&self, route: &str, request: &Request) -> Result<Reply, DispatchError> {
        let Some(handler) = self.handlers.get(route) else {
            tracing::debug!(route, matched = false, "dispatch");
            return Err(DispatchError::NoMatchingRoute {
                route: route.to_string(),
            });
        };
        tracing::debug!(route, matched = true, "dispatch");
        handler.handle(request).map_err(DispatchError::Handler)
    }

    /// Dispatch using the request's own route key.
    pub fn route(&self, request: &Request) -> Result<Reply, DispatchError> {
        self.dispatch(request.route(), request)
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<&str> = self.routes().collect();
        routes.sort_unstable();
        f.debug_struct("Router").field("routes", &routes).finish()
    }
}

impl FromIterator<(String, Arc<dyn Handler>)> for Router {
    fn from_iter<I: IntoIterator<Item = (String, Arc<dyn Handler>)>>(iter: I) -> Self {
        Self::from_table(iter.into_iter().collect())
    }
}

impl Extend<(String, Arc<dyn Handler>)> for Router {
    fn extend<I: IntoIterator<Item = (String, Arc<dyn Handler>)>>(&mut self, iter: I) {
        self.handlers.extend(iter);
    }
}
