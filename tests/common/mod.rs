//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::Request, http::StatusCode, Router};
use route_proxy::backend::StubServer;
use route_proxy::config::{ProxyConfig, RouteConfig};
use route_proxy::proxy::upstream_client;
use route_proxy::HttpServer;
use tokio::net::TcpListener;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Start a backend stub on an ephemeral port. Returns its address and greeting.
pub async fn start_stub() -> (SocketAddr, String) {
    let stub = StubServer::bind("127.0.0.1:0").await.unwrap();
    let addr = stub.local_addr().unwrap();
    let greeting = stub.greeting().to_string();
    tokio::spawn(stub.run());
    (addr, greeting)
}

/// Start a backend that answers `METHOD URI` followed by the request body.
pub async fn start_echo_backend() -> SocketAddr {
    serve(Router::new().fallback(|request: Request| async move {
        let head = format!("{} {}", request.method(), request.uri());
        let body = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        format!("{head}\n{}", String::from_utf8_lossy(&body))
    }))
    .await
}

/// Start a backend that waits `delay` before answering `body`.
pub async fn start_slow_backend(delay: Duration, body: &'static str) -> SocketAddr {
    serve(Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        body
    }))
    .await
}

/// Start a backend that answers 418 with an end-to-end header and a
/// connection-scoped one named by `Connection`.
pub async fn start_teapot_backend() -> SocketAddr {
    serve(Router::new().fallback(|| async {
        (
            StatusCode::IM_A_TEAPOT,
            [
                ("x-backend", "a"),
                ("connection", "x-secret"),
                ("x-secret", "1"),
            ],
            "short and stout",
        )
    }))
    .await
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start a dispatcher routing each `(prefix, backend)` pair.
pub async fn start_proxy(routes: &[(&str, SocketAddr)]) -> SocketAddr {
    let mut config = ProxyConfig::default();
    config.routes = routes
        .iter()
        .map(|(prefix, backend)| {
            RouteConfig::new(prefix.trim_start_matches('/'), *prefix, format!("http://{backend}"))
        })
        .collect();

    let server = HttpServer::from_config(&config, upstream_client()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(server.run(listener));
    addr
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
