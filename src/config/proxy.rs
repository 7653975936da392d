//! Development proxy rules
//!
//! A rule forwards every path under `prefix` to `target` unchanged (no path
//! rewrite). When the base URL is left empty the transport routes through the
//! matching rule, which is how the reverse-proxied deployment is expressed.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Status reported when the upstream of a proxy rule cannot be reached
pub const PROXY_ERROR_STATUS: u16 = 500;

/// A single prefix → target forwarding rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRule {
    /// Path prefix this rule captures (e.g. `/api`)
    pub prefix: String,

    /// Upstream origin requests are forwarded to
    pub target: String,

    /// Rewrite the `Host` header to the target's authority
    #[serde(default = "default_change_origin")]
    pub change_origin: bool,

    /// Upstream timeout in seconds; replaces the default request budget
    #[serde(default = "super::defaults::default_proxy_timeout")]
    pub timeout: u64,
}

const fn default_change_origin() -> bool {
    true
}

impl ProxyRule {
    /// Create a rule with the default origin rewrite and timeout
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
            change_origin: true,
            timeout: super::defaults::default_proxy_timeout(),
        }
    }

    /// Whether this rule captures `path`
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }

    /// Upstream URL for `path`; the path is forwarded as-is
    #[must_use]
    pub fn target_url(&self, path: &str) -> String {
        format!("{}{}", self.target.trim_end_matches('/'), path)
    }

    /// Upstream timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// `Host` header to send upstream, when origin rewriting is on
    #[must_use]
    pub fn host_header(&self) -> Option<String> {
        if !self.change_origin {
            return None;
        }
        let url = url::Url::parse(&self.target).ok()?;
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    /// Error reported when the upstream cannot be reached
    #[must_use]
    pub fn unreachable(&self, reason: &str) -> ClientError {
        ClientError::Status {
            status: PROXY_ERROR_STATUS,
            message: format!("Proxy server error: {reason}"),
        }
    }

    /// Validate the rule
    pub fn validate(&self) -> Result<()> {
        if !self.prefix.starts_with('/') {
            return Err(ClientError::InvalidConfig(format!(
                "proxy prefix must start with '/': {}",
                self.prefix
            )));
        }
        url::Url::parse(&self.target).map_err(|e| {
            ClientError::InvalidConfig(format!("invalid proxy target {}: {e}", self.target))
        })?;
        if self.timeout == 0 {
            return Err(ClientError::InvalidConfig(
                "proxy timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
