//! Handler middleware.

pub mod request_log;

pub use request_log::{dump_request, log_request, with_request_log};
