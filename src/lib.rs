//! Path-routing reverse proxy library.
//!
//! ```text
//! client → http::server (dispatch by prefix)
//!        → http::middleware::request_log (dump request)
//!        → proxy::ReverseProxy (forward)
//!        → backend
//! ```

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod routing;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use routing::RouteTable;
