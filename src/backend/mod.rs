//! Demonstration backends.
//!
//! Each stub answers every request with a greeting naming its port, so a
//! response shows which backend a route reached.

pub mod stub;

pub use stub::StubServer;
