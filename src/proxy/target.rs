//! Backend target parsing and URI rewriting.
//!
//! The inbound path is kept whole and joined onto the target's base path;
//! the matched route prefix is not stripped.

use std::fmt;

use axum::http::{uri::InvalidUri, Uri};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported target scheme `{0}` (only http is supported)")]
    UnsupportedScheme(String),

    #[error("target URL `{0}` has no host")]
    MissingHost(String),
}

/// A parsed backend base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    raw: String,
    scheme: String,
    authority: String,
    base_path: String,
    base_query: Option<String>,
}

impl Target {
    /// Parse an absolute `http` URL with a host.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw)?;

        if url.scheme() != "http" {
            return Err(TargetError::UnsupportedScheme(url.scheme().to_string()));
        }

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| TargetError::MissingHost(raw.to_string()))?;

        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            raw: raw.to_string(),
            scheme: url.scheme().to_string(),
            authority,
            base_path: url.path().to_string(),
            base_query: url.query().map(str::to_string),
        })
    }

    /// Host and optional port requests are sent to.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Point an inbound URI at this target.
    pub fn rewrite(&self, uri: &Uri) -> Result<Uri, InvalidUri> {
        let path = join_paths(&self.base_path, uri.path());

        let query = match (self.base_query.as_deref(), uri.query()) {
            (Some(base), Some(query)) if !base.is_empty() && !query.is_empty() => {
                Some(format!("{base}&{query}"))
            }
            (Some(base), _) if !base.is_empty() => Some(base.to_string()),
            (_, Some(query)) if !query.is_empty() => Some(query.to_string()),
            _ => None,
        };

        let rewritten = match query {
            Some(query) => format!("{}://{}{}?{}", self.scheme, self.authority, path, query),
            None => format!("{}://{}{}", self.scheme, self.authority, path),
        };
        rewritten.parse()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Join two paths with exactly one slash between them.
fn join_paths(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{base}/{path}"),
        _ => format!("{base}{path}"),
    }
}
