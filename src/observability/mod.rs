//! Observability subsystem.
//!
//! All subsystems emit `tracing` events with structured fields; `logging.rs`
//! installs the subscriber that writes them to stdout.

pub mod logging;
