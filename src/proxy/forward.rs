//! Request forwarding to a single backend.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http::{self, StatusCode, Version},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tower::Service;

use crate::proxy::headers;
use crate::proxy::target::Target;

/// HTTP client shared by every route.
pub type UpstreamClient = Client<HttpConnector, Body>;

/// Build the upstream client with the default connection pool.
pub fn upstream_client() -> UpstreamClient {
    Client::builder(TokioExecutor::new()).build(HttpConnector::new())
}

/// Reverse proxy bound to one backend target.
///
/// Cheap to clone; every clone shares the target and the client.
#[derive(Clone)]
pub struct ReverseProxy {
    inner: Arc<Inner>,
}

struct Inner {
    target: Target,
    client: UpstreamClient,
}

impl ReverseProxy {
    pub fn new(client: UpstreamClient, target: Target) -> Self {
        Self {
            inner: Arc::new(Inner { target, client }),
        }
    }

    pub fn target(&self) -> &Target {
        &self.inner.target
    }

    /// Forward `request` to the target and relay the backend's response.
    ///
    /// Transport failures become `502 Bad Gateway`; nothing is retried.
    pub async fn forward(&self, request: Request) -> Response {
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        let upstream = match self.prepare(request) {
            Ok(upstream) => upstream,
            Err(e) => {
                tracing::error!(
                    upstream = %self.inner.target,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Failed to build upstream request"
                );
                return StatusCode::BAD_GATEWAY.into_response();
            }
        };

        tracing::debug!(upstream = %upstream.uri(), method = %method, "Forwarding request");

        match self.inner.client.request(upstream).await {
            Ok(response) => {
                tracing::debug!(
                    upstream = %self.inner.target,
                    status = response.status().as_u16(),
                    method = %method,
                    path = %path,
                    "Upstream responded"
                );
                relay(response)
            }
            Err(e) => {
                tracing::error!(
                    upstream = %self.inner.target,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Upstream request failed"
                );
                StatusCode::BAD_GATEWAY.into_response()
            }
        }
    }

    fn prepare(&self, request: Request) -> Result<Request, axum::http::uri::InvalidUri> {
        let (mut parts, body) = request.into_parts();

        let client_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());

        parts.uri = self.inner.target.rewrite(&parts.uri)?;
        parts.version = Version::HTTP_11;
        headers::prepare_upstream(&mut parts.headers, client_ip);

        Ok(Request::from_parts(parts, body))
    }
}

/// Hand the backend response to the client; the body streams through.
fn relay(response: http::Response<Incoming>) -> Response {
    let (mut parts, body) = response.into_parts();
    headers::strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

impl std::fmt::Debug for ReverseProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReverseProxy")
            .field("target", &self.inner.target)
            .finish_non_exhaustive()
    }
}

impl Service<Request> for ReverseProxy {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let proxy = self.clone();
        Box::pin(async move { Ok(proxy.forward(request).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    async fn spawn_echo() -> SocketAddr {
        let app = Router::new().fallback(|request: Request| async move {
            let host = request
                .headers()
                .get("host")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let xff = request
                .headers()
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let uri = request.uri().to_string();
            let body = axum::body::to_bytes(request.into_body(), usize::MAX)
                .await
                .unwrap();
            format!("{uri}|{host}|{xff}|{}", String::from_utf8_lossy(&body))
        });

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn forwards_path_body_and_client_address() {
        let backend = spawn_echo().await;
        let target = Target::parse(&format!("http://{backend}")).unwrap();
        let proxy = ReverseProxy::new(upstream_client(), target);

        let mut request = Request::builder()
            .method("POST")
            .uri("/svca/items?page=2")
            .header("host", "localhost:8080")
            .header("connection", "keep-alive")
            .body(Body::from("payload"))
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 40000))));

        let response = proxy.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_string(response).await,
            "/svca/items?page=2|localhost:8080|192.0.2.10|payload"
        );
    }

    #[tokio::test]
    async fn missing_host_is_filled_from_target() {
        let backend = spawn_echo().await;
        let target = Target::parse(&format!("http://{backend}")).unwrap();
        let proxy = ReverseProxy::new(upstream_client(), target);

        let request = Request::builder()
            .uri("/svcb")
            .body(Body::empty())
            .unwrap();

        let response = proxy.oneshot(request).await.unwrap();
        assert_eq!(
            body_string(response).await,
            format!("/svcb|{backend}||")
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_bad_gateway() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let target = Target::parse(&format!("http://{addr}")).unwrap();
        let proxy = ReverseProxy::new(upstream_client(), target);

        let response = proxy.forward(Request::new(Body::empty())).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
