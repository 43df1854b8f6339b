//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyConfig::default()          (demo topology, used by the binary)
//! config file (TOML)              (embedders and tests)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so a partial file still describes the demo
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ProxyConfig, RouteConfig, StubConfig};
pub use validation::{validate_config, ValidationError};
