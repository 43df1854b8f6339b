//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate bind addresses and route targets
//! - Detect conflicting routes and listeners
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;
use crate::proxy::target::{Target, TargetError};
use crate::routing::matcher::PathPrefixMatcher;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no routes configured")]
    NoRoutes,

    #[error("invalid bind address `{address}`: {reason}")]
    InvalidBindAddress { address: String, reason: String },

    #[error("bind address `{0}` is used more than once")]
    DuplicateBindAddress(String),

    #[error("route `{route}`: path prefix `{prefix}` must start with '/'")]
    InvalidPrefix { route: String, prefix: String },

    #[error("route `{route}`: path prefix `{prefix}` is already registered")]
    DuplicatePrefix { route: String, prefix: String },

    #[error("route `{route}`: {source}")]
    InvalidTarget { route: String, source: TargetError },
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    }

    let mut addresses = HashSet::new();
    let binds = std::iter::once(&config.listener.bind_address)
        .chain(config.stubs.iter().map(|stub| &stub.bind_address));
    for address in binds {
        match address.parse::<SocketAddr>() {
            Ok(addr) => {
                if !addresses.insert(addr) {
                    errors.push(ValidationError::DuplicateBindAddress(address.clone()));
                }
            }
            Err(e) => errors.push(ValidationError::InvalidBindAddress {
                address: address.clone(),
                reason: e.to_string(),
            }),
        }
    }

    let mut prefixes = HashSet::new();
    for route in &config.routes {
        if !PathPrefixMatcher::is_valid_prefix(&route.path_prefix) {
            errors.push(ValidationError::InvalidPrefix {
                route: route.name.clone(),
                prefix: route.path_prefix.clone(),
            });
        } else if !prefixes.insert(route.path_prefix.as_str()) {
            errors.push(ValidationError::DuplicatePrefix {
                route: route.name.clone(),
                prefix: route.path_prefix.clone(),
            });
        }

        if let Err(source) = Target::parse(&route.target) {
            errors.push(ValidationError::InvalidTarget {
                route: route.name.clone(),
                source,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
