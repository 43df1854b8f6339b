//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Bind backend stubs and the dispatcher listener
//! - Run every listener as its own task
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when the route table is built)
//! - A listener that stops takes the process down with it

use tokio::task::JoinSet;

use crate::backend::StubServer;
use crate::config::{validate_config, ConfigError, ProxyConfig};
use crate::http::server::{BuildError, HttpServer};
use crate::net::{self, ListenerError};
use crate::proxy::upstream_client;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("listener task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Start the stubs and the dispatcher described by `config` and serve.
///
/// Returns only when a listener fails or exits.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let mut listeners = JoinSet::new();

    for stub in &config.stubs {
        let server = StubServer::bind(&stub.bind_address).await?;
        listeners.spawn(server.run());
    }

    let server = HttpServer::from_config(&config, upstream_client())?;
    let listener = net::bind(&config.listener.bind_address).await?;
    listeners.spawn(server.run(listener));

    tracing::info!(
        routes = config.routes.len(),
        stubs = config.stubs.len(),
        "Startup complete"
    );

    if let Some(result) = listeners.join_next().await {
        result??;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_config_fails_before_binding() {
        let mut config = ProxyConfig::default();
        config.routes[0].target = "localhost:8888".into();

        let err = run(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }

    #[tokio::test]
    async fn occupied_stub_port_is_fatal() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let mut config = ProxyConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.stubs = vec![crate::config::StubConfig::new(addr.to_string())];

        let err = run(config).await.unwrap_err();
        assert!(matches!(err, StartupError::Listener(ListenerError::Bind { .. })));
    }
}
