//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Register routes while configuring
//! - Look up matching route for a request path
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - `RouteTableBuilder` is the configuring state; `RouteTable` is frozen
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical route counts)
//! - Explicit NoMatch rather than silent default

use std::convert::Infallible;

use axum::{extract::Request, response::Response};
use tower::util::BoxCloneSyncService;

use crate::routing::matcher::PathPrefixMatcher;

/// The request handling capability every route exposes.
pub type RouteHandler = BoxCloneSyncService<Request, Response, Infallible>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route `{name}`: path prefix `{prefix}` must start with '/'")]
    InvalidPrefix { name: String, prefix: String },

    #[error("route `{name}`: path prefix `{prefix}` is already registered")]
    DuplicatePrefix { name: String, prefix: String },
}

/// A named binding between a path prefix and its handler.
pub struct Route {
    name: String,
    matcher: PathPrefixMatcher,
    handler: RouteHandler,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("prefix", &self.matcher.prefix())
            .finish_non_exhaustive()
    }
}

/// Routes being registered; no traffic is served yet.
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    /// Register a route. Prefixes must be absolute and unique.
    pub fn route(
        mut self,
        name: impl Into<String>,
        prefix: impl Into<String>,
        handler: RouteHandler,
    ) -> Result<Self, RouteError> {
        let name = name.into();
        let prefix = prefix.into();

        if !PathPrefixMatcher::is_valid_prefix(&prefix) {
            return Err(RouteError::InvalidPrefix { name, prefix });
        }
        if self.routes.iter().any(|r| r.prefix() == prefix) {
            return Err(RouteError::DuplicatePrefix { name, prefix });
        }

        tracing::debug!(route = %name, prefix = %prefix, "Route registered");
        self.routes.push(Route {
            name,
            matcher: PathPrefixMatcher::new(prefix),
            handler,
        });
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
        }
    }
}

/// Immutable route table shared by all connections.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Find the first route whose prefix covers `path`.
    pub fn match_path(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.matcher.matches(path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
