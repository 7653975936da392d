//! The shared transport every wrapper call flows through
//!
//! One long-lived `reqwest::Client` plus the request and response
//! interceptors. Construct it once and pass it by reference.

use super::request::{ApiRequest, RequestBody, RequestInterceptor, ResponseKind};
use super::response::{ApiResponse, BinaryPayload, Envelope, RawResponse, ResponseInterceptor};
use crate::config::{Config, ProxyRule, Timeouts};
use crate::error::{ClientError, Result};
use crate::notify::Notifier;
use reqwest::header::{HeaderName, ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE, HOST};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Settings the transport is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Backend origin; empty routes through `proxy`
    pub base_url: String,
    /// Timeout budgets
    pub timeouts: Timeouts,
    /// Proxy rules used when `base_url` is empty
    pub proxy: Vec<ProxyRule>,
    /// `User-Agent` header
    pub user_agent: String,
}

impl From<&Config> for TransportConfig {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeouts: config.timeouts,
            proxy: config.proxy.clone(),
            user_agent: format!("mldash/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Shared HTTP transport with interceptors
#[derive(Debug)]
pub struct Transport {
    http: Client,
    config: TransportConfig,
    request: RequestInterceptor,
    response: ResponseInterceptor,
}

impl Transport {
    /// Build the transport
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: TransportConfig, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let http = Client::builder()
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(config.timeouts.connect_duration())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Internal(format!("Failed to create HTTP client: {e}")))?;

        let request = RequestInterceptor::new(
            config.base_url.clone(),
            config.timeouts.default_duration(),
            config.proxy.clone(),
        );

        Ok(Self {
            http,
            config,
            request,
            response: ResponseInterceptor::new(notifier),
        })
    }

    /// Build the transport straight from a loaded [`Config`]
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        Self::new(TransportConfig::from(config), notifier)
    }

    /// Settings this transport was built from
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Timeout budgets
    #[must_use]
    pub const fn timeouts(&self) -> &Timeouts {
        &self.config.timeouts
    }

    /// Dispatch a request and apply the response policy
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let prepared = self.request.prepare(&request)?;

        let mut builder = self
            .http
            .request(request.method.clone(), &prepared.url)
            .timeout(prepared.timeout);

        if request.response_kind == ResponseKind::Json {
            builder = builder.header(ACCEPT, "application/json");
        }
        if let Some(host) = prepared.proxy.as_ref().and_then(ProxyRule::host_header) {
            builder = builder.header(HOST, host);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(parts) => {
                let mut form = Form::new();
                for part in parts {
                    let file = match Part::bytes(part.bytes)
                        .file_name(part.file_name)
                        .mime_str(&part.content_type)
                    {
                        Ok(file) => file,
                        Err(err) => {
                            return Err(self.response.on_setup_error(&request.path, &err.to_string()))
                        }
                    };
                    form = form.part(part.field, file);
                }
                builder.multipart(form)
            }
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                return Err(match &prepared.proxy {
                    Some(rule) if !err.is_builder() => {
                        self.response.on_proxy_error(&request.path, rule, &err)
                    }
                    _ => self.response.on_transport_error(&request.path, &err),
                })
            }
        };

        let status = response.status().as_u16();
        let header = |name: HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);

        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => return Err(self.response.on_transport_error(&request.path, &err)),
        };

        self.response.on_response(
            &request.path,
            request.response_kind,
            RawResponse {
                status,
                content_type,
                content_disposition,
                body,
            },
        )
    }

    /// Dispatch a request expecting a JSON envelope
    pub async fn json(&self, request: ApiRequest) -> Result<Envelope> {
        self.execute(request).await?.into_envelope()
    }

    /// Dispatch a request expecting a binary download
    pub async fn binary(&self, request: ApiRequest) -> Result<BinaryPayload> {
        self.execute(request.binary()).await?.into_binary()
    }
}
