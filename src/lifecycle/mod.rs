//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate config → Bind stubs → Build route table → Bind dispatcher → Serve
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes are frozen before the dispatcher accepts traffic
//! - No shutdown path; the process serves until it is killed

pub mod startup;

pub use startup::{run, StartupError};
