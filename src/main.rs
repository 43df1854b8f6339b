//! Path-routing reverse proxy demo.
//!
//! Starts two backend stubs (`:8888`, `:9999`) and a dispatcher on `:8080`
//! that forwards `/svca` and `/svcb` to them, logging every request in full.

use route_proxy::{lifecycle, observability, ProxyConfig};

#[tokio::main]
async fn main() {
    let config = ProxyConfig::default();
    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        "route-proxy v0.1.0 starting"
    );

    if let Err(e) = lifecycle::run(config).await {
        tracing::error!(error = %e, "Fatal error");
        std::process::exit(1);
    }
}
