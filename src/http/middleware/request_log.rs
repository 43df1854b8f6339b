//! Full request dump logging.
//!
//! Every request reaching a route is written to the log as raw HTTP
//! (start line, headers, body) before it is forwarded. The body is buffered
//! to do this and handed downstream byte-for-byte unchanged.

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header, request::Parts},
    middleware::{from_fn, Next},
    response::Response,
};
use futures_util::stream;
use tower::{util::BoxCloneSyncService, Service, ServiceBuilder};

use crate::routing::RouteHandler;

/// Wrap `handler` so each request is dumped to the log first.
pub fn with_request_log<S>(handler: S) -> RouteHandler
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + Sync + 'static,
    S::Future: Send + 'static,
{
    BoxCloneSyncService::new(ServiceBuilder::new().layer(from_fn(log_request)).service(handler))
}

/// Middleware: log the full request, then run the rest of the chain.
pub async fn log_request(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            tracing::info!(
                method = %parts.method,
                uri = %parts.uri,
                "\n{}",
                dump_request(&parts, &bytes)
            );
            Body::from(bytes)
        }
        Err(e) => {
            tracing::warn!(
                method = %parts.method,
                uri = %parts.uri,
                error = %e,
                "Failed to dump request"
            );
            // Downstream sees the same failure instead of a silently truncated body.
            Body::from_stream(stream::once(async move { Err::<Bytes, _>(e) }))
        }
    };

    next.run(Request::from_parts(parts, body)).await
}

/// Render a request the way it appeared on the wire.
pub fn dump_request(parts: &Parts, body: &[u8]) -> String {
    let mut out = String::new();

    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    out.push_str(&format!("{} {} {:?}\r\n", parts.method, target, parts.version));

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .or_else(|| parts.uri.authority().map(|a| a.as_str()));
    if let Some(host) = host {
        out.push_str(&format!("Host: {host}\r\n"));
    }

    // Framing headers describe the connection, not the request.
    let skipped = [header::HOST, header::TRANSFER_ENCODING, header::TRAILER];
    for (name, value) in parts.headers.iter().filter(|(name, _)| !skipped.contains(name)) {
        out.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }

    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}
