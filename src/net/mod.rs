//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured bind address
//!     → listener.rs (parse, bind; failure is fatal at startup)
//!     → Hand off to the dispatcher or a backend stub
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
