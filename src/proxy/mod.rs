//! Single-host reverse proxying.
//!
//! # Data Flow
//! ```text
//! Request (already matched to a route)
//!     → target.rs (rewrite scheme/authority, join path & query)
//!     → headers.rs (strip hop-by-hop, X-Forwarded-For)
//!     → forward.rs (send via shared client, relay streamed response)
//!     → 502 on transport failure
//! ```

pub mod forward;
pub mod headers;
pub mod target;

pub use forward::{upstream_client, ReverseProxy, UpstreamClient};
pub use target::{Target, TargetError};
