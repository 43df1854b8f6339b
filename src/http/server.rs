//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Build the route table from configuration
//! - Create the axum Router with the dispatch fallback
//! - Wire up middleware (tracing)
//! - Serve connections on a bound listener

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::http::middleware::with_request_log;
use crate::net::ListenerError;
use crate::proxy::{ReverseProxy, Target, TargetError, UpstreamClient};
use crate::routing::{RouteError, RouteTable};

/// Body of the fallback response for unmatched paths.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Error raised while turning configuration into a route table.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("route `{route}`: {source}")]
    Target { route: String, source: TargetError },

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// HTTP server for the dispatcher.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server dispatching over an already built route table.
    pub fn new(routes: RouteTable) -> Self {
        Self {
            router: Self::build_router(routes),
        }
    }

    /// Register every configured route as a logged reverse proxy.
    pub fn from_config(config: &ProxyConfig, client: UpstreamClient) -> Result<Self, BuildError> {
        let mut builder = RouteTable::builder();

        for route in &config.routes {
            let target = Target::parse(&route.target).map_err(|source| BuildError::Target {
                route: route.name.clone(),
                source,
            })?;

            tracing::info!(
                route = %route.name,
                prefix = %route.path_prefix,
                target = %target,
                "Route configured"
            );

            let proxy = ReverseProxy::new(client.clone(), target);
            builder = builder.route(&route.name, &route.path_prefix, with_request_log(proxy))?;
        }

        Ok(Self::new(builder.build()))
    }

    fn build_router(routes: RouteTable) -> Router {
        tracing::debug!(routes = routes.len(), "Route table frozen");
        Router::new()
            .fallback(dispatch)
            .with_state(Arc::new(routes))
            .layer(TraceLayer::new_for_http())
    }

    /// The underlying router, for driving the dispatcher without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve connections on `listener` until the process exits.
    pub async fn run(self, listener: TcpListener) -> Result<(), ListenerError> {
        let addr = listener.local_addr().map_err(ListenerError::Serve)?;
        tracing::info!(address = %addr, "Dispatcher serving");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .await
            .map_err(ListenerError::Serve)
    }
}

/// Look up the route for the request path and hand the request to it.
async fn dispatch(State(routes): State<Arc<RouteTable>>, request: Request) -> Response {
    let Some(route) = routes.match_path(request.uri().path()) else {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "No route matched"
        );
        return (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response();
    };

    tracing::debug!(route = route.name(), path = %request.uri().path(), "Route matched");

    match route.handler().clone().oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}
