//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, one task per connection)
//!     → dispatch (route table lookup, 404 fallback)
//!     → middleware/request_log.rs (dump request)
//!     → proxy::ReverseProxy (forward, relay response)
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use server::HttpServer;
