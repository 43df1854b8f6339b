//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate prefix)
//!     → Return: matched Route or NoMatch
//!
//! Route Registration (at startup):
//!     RouteTableBuilder::route(name, prefix, handler)
//!     → reject malformed / duplicate prefixes
//!     → build() freezes an immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Route, RouteError, RouteHandler, RouteTable, RouteTableBuilder};
