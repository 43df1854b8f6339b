//! Backend stub server.

use std::net::SocketAddr;

use axum::{http::header, response::IntoResponse, Router};
use tokio::net::TcpListener;

use crate::net::{self, ListenerError};

/// A backend that replies `hello from :<port>` to any request.
pub struct StubServer {
    listener: TcpListener,
    greeting: String,
}

impl StubServer {
    /// Bind the stub. Failure here is fatal at startup.
    pub async fn bind(address: &str) -> Result<Self, ListenerError> {
        let listener = net::bind(address).await?;
        Self::from_listener(listener)
    }

    /// Wrap an already bound listener.
    pub fn from_listener(listener: TcpListener) -> Result<Self, ListenerError> {
        let addr = listener.local_addr().map_err(ListenerError::Serve)?;
        Ok(Self {
            listener,
            greeting: format!("hello from :{}", addr.port()),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Serve until the process exits.
    pub async fn run(self) -> Result<(), ListenerError> {
        let addr = self.listener.local_addr().map_err(ListenerError::Serve)?;
        tracing::info!(address = %addr, greeting = %self.greeting, "Backend stub serving");

        let greeting = self.greeting;
        let app = Router::new().fallback(move || {
            let greeting = greeting.clone();
            async move {
                ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], greeting).into_response()
            }
        });

        axum::serve(self.listener, app)
            .await
            .map_err(ListenerError::Serve)
    }
}
