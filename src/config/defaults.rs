//! Default configuration values

use super::proxy::ProxyRule;

/// Default backend base URL (direct host:port)
pub fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

/// Default request timeout in seconds
pub const fn default_timeout() -> u64 {
    60
}

/// Default dataset upload timeout in seconds
pub const fn default_upload_timeout() -> u64 {
    120 // 2 minutes
}

/// Default model training timeout in seconds
pub const fn default_training_timeout() -> u64 {
    600 // 10 minutes
}

/// Default AutoML search timeout in seconds
pub const fn default_automl_timeout() -> u64 {
    600 // 10 minutes
}

/// Default connect timeout in seconds
pub const fn default_connect_timeout() -> u64 {
    10
}

/// Default development proxy timeout in seconds
pub const fn default_proxy_timeout() -> u64 {
    300 // 5 minutes
}

/// Default development proxy rules: forward `/api` to the local backend
pub fn default_proxy_rules() -> Vec<ProxyRule> {
    vec![ProxyRule::new("/api", default_base_url())]
}

/// Floor applied to long-running operations, in seconds
pub const LONG_RUNNING_TIMEOUT_SECS: u64 = 600;

/// Path fragments that mark an operation as long-running
pub const LONG_RUNNING_PATTERNS: [&str; 3] = ["train", "automl", "stacking"];

/// How long an error notice stays visible, in seconds
pub const NOTICE_DURATION_SECS: u64 = 5;

/// Timeout for service availability probes, in seconds
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Environment variable overriding the backend base URL
pub const ENV_API_URL: &str = "MLDASH_API_URL";
