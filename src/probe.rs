//! Backend availability probes
//!
//! These bypass the shared transport on purpose: a probe never raises notices
//! and never fails, it only answers "reachable or not".

use crate::api::endpoints;
use crate::config::PROBE_TIMEOUT_SECS;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::warn;

/// Snapshot of backend reachability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// `GET /api/health` answered 200
    pub is_available: bool,
    /// Probed origin
    pub base_url: String,
    /// When the probe ran (RFC 3339)
    pub timestamp: String,
    /// Human-readable summary
    pub message: String,
}

/// Whether `GET {base_url}/api/health` answers 200 within `timeout`
pub async fn check_api_service(base_url: &str, timeout: Duration) -> bool {
    let client = match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "API service check failed");
            return false;
        }
    };
    let url = format!("{}{}", base_url.trim_end_matches('/'), endpoints::HEALTH);
    match client.get(&url).send().await {
        Ok(response) => response.status() == StatusCode::OK,
        Err(e) => {
            warn!(url = %url, error = %e, "API service check failed");
            false
        }
    }
}

/// Whether anything answers HTTP on `host:port`
///
/// Any response, whatever its status, counts as open.
pub async fn check_port(host: &str, port: u16) -> bool {
    let Ok(client) = Client::builder()
        .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
        .build()
    else {
        return false;
    };
    client
        .head(format!("http://{host}:{port}"))
        .send()
        .await
        .is_ok()
}

/// Probe `base_url` and summarize the result
pub async fn server_info(base_url: &str) -> ServerInfo {
    let is_available =
        check_api_service(base_url, Duration::from_secs(PROBE_TIMEOUT_SECS)).await;
    ServerInfo {
        is_available,
        base_url: base_url.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        message: if is_available {
            "Server connection OK".to_string()
        } else {
            "Unable to connect to the server".to_string()
        },
    }
}
