//! Request descriptors and the request-phase interceptor
//!
//! Every wrapper call builds an [`ApiRequest`]; the [`RequestInterceptor`]
//! turns it into the concrete URL and timeout for one dispatch. The shared
//! configuration is never mutated: each request gets its own effective values.

use crate::config::{ProxyRule, LONG_RUNNING_PATTERNS, LONG_RUNNING_TIMEOUT_SECS};
use crate::error::{ClientError, Result};
use reqwest::Method;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// How the response body should be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// JSON envelope, inspected by the response interceptor
    #[default]
    Json,
    /// Raw bytes (file downloads), passed through untouched
    Binary,
}

/// One file in a multipart upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    /// Form field name (e.g. `train_file`)
    pub field: String,
    /// File name reported to the server; the backend picks its parser from the extension
    pub file_name: String,
    /// MIME type of the part
    pub content_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl UploadPart {
    /// Build a part from in-memory bytes, guessing the MIME type from the file name
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string();
        Self {
            field: field.into(),
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a part from disk
    pub async fn from_path(field: impl Into<String>, path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ClientError::FileError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ClientError::InvalidArgument(format!("not a file path: {}", path.display()))
            })?;
        Ok(Self::new(field, file_name, bytes))
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON body
    Json(serde_json::Value),
    /// `multipart/form-data` body
    Multipart(Vec<UploadPart>),
}

/// Description of a single backend call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb
    pub method: Method,
    /// Path relative to the backend origin, starting with `/`
    pub path: String,
    /// Payload
    pub body: RequestBody,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// Timeout override; the transport default applies when `None`
    pub timeout: Option<Duration>,
    /// Expected response kind
    pub response_kind: ResponseKind,
}

impl ApiRequest {
    /// New request without body
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            headers: Vec::new(),
            timeout: None,
            response_kind: ResponseKind::Json,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::SerializationError(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a multipart body
    #[must_use]
    pub fn multipart(mut self, parts: Vec<UploadPart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Override the timeout for this request
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Expect a binary response
    #[must_use]
    pub const fn binary(mut self) -> Self {
        self.response_kind = ResponseKind::Binary;
        self
    }

    /// Whether this call targets a long-running operation
    #[must_use]
    pub fn is_long_running(&self) -> bool {
        is_long_running(&self.path)
    }
}

/// Whether `path` names a long-running operation (train, automl, stacking)
#[must_use]
pub fn is_long_running(path: &str) -> bool {
    LONG_RUNNING_PATTERNS.iter().any(|p| path.contains(p))
}

/// Concrete dispatch parameters for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Absolute URL
    pub url: String,
    /// Effective timeout
    pub timeout: Duration,
    /// Proxy rule the request is routed through, if any
    pub proxy: Option<ProxyRule>,
}

/// Request-phase policy: URL resolution, timeout escalation, logging
#[derive(Debug, Clone)]
pub struct RequestInterceptor {
    base_url: String,
    default_timeout: Duration,
    proxy: Vec<ProxyRule>,
}

impl RequestInterceptor {
    /// Create an interceptor for the given origin and default budget
    pub fn new(base_url: impl Into<String>, default_timeout: Duration, proxy: Vec<ProxyRule>) -> Self {
        Self {
            base_url: base_url.into(),
            default_timeout,
            proxy,
        }
    }

    /// Proxy rule that carries `path`
    ///
    /// Rules only apply when no base URL is configured.
    #[must_use]
    pub fn proxy_rule(&self, path: &str) -> Option<&ProxyRule> {
        if self.base_url.is_empty() {
            self.proxy.iter().find(|rule| rule.matches(path))
        } else {
            None
        }
    }

    /// Absolute URL for `path`
    ///
    /// A non-empty base URL wins; otherwise the first proxy rule capturing the
    /// path supplies the upstream.
    pub fn resolve_url(&self, path: &str) -> Result<String> {
        if !self.base_url.is_empty() {
            return Ok(format!("{}{}", self.base_url.trim_end_matches('/'), path));
        }
        self.proxy_rule(path)
            .map(|rule| rule.target_url(path))
            .ok_or_else(|| {
                ClientError::InvalidConfig(format!(
                    "no base URL configured and no proxy rule matches {path}"
                ))
            })
    }

    /// Timeout for `request`, raised to the long-running floor when needed
    ///
    /// A proxied request without its own override uses the rule's timeout
    /// instead of the default budget.
    #[must_use]
    pub fn effective_timeout(&self, request: &ApiRequest) -> Duration {
        let fallback = self
            .proxy_rule(&request.path)
            .map_or(self.default_timeout, ProxyRule::timeout);
        let timeout = request.timeout.unwrap_or(fallback);
        let floor = Duration::from_secs(LONG_RUNNING_TIMEOUT_SECS);
        if request.is_long_running() && timeout < floor {
            floor
        } else {
            timeout
        }
    }

    /// Resolve URL and timeout, logging the outgoing call
    pub fn prepare(&self, request: &ApiRequest) -> Result<PreparedRequest> {
        let url = self.resolve_url(&request.path)?;
        let timeout = self.effective_timeout(request);
        let proxy = self.proxy_rule(&request.path).cloned();

        info!(method = %request.method, url = %url, proxied = proxy.is_some(), "request");
        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(value) => debug!(body = %value, "request data"),
            RequestBody::Multipart(parts) => {
                let files: Vec<&str> = parts.iter().map(|p| p.file_name.as_str()).collect();
                debug!(?files, "request files");
            }
        }

        Ok(PreparedRequest {
            url,
            timeout,
            proxy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interceptor(default_secs: u64) -> RequestInterceptor {
        RequestInterceptor::new(
            "http://127.0.0.1:5000/",
            Duration::from_secs(default_secs),
            Vec::new(),
        )
    }

    #[test]
    fn long_running_paths() {
        assert!(is_long_running("/api/ml/train"));
        assert!(is_long_running("/api/automl/run"));
        assert!(is_long_running("/api/stacking/models"));
        assert!(!is_long_running("/api/ml/predict"));
        assert!(!is_long_running("/api/reports/list"));
    }

    #[test]
    fn timeout_is_raised_for_long_running_calls() {
        let interceptor = interceptor(60);

        let train = ApiRequest::post("/api/ml/train").timeout(Duration::from_secs(5));
        assert_eq!(interceptor.effective_timeout(&train), Duration::from_secs(600));

        let automl = ApiRequest::post("/api/automl/run");
        assert_eq!(interceptor.effective_timeout(&automl), Duration::from_secs(600));

        let longer = ApiRequest::post("/api/stacking/train").timeout(Duration::from_secs(1800));
        assert_eq!(interceptor.effective_timeout(&longer), Duration::from_secs(1800));
    }

    #[test]
    fn ordinary_calls_keep_their_timeout() {
        let interceptor = interceptor(60);
        assert_eq!(
            interceptor.effective_timeout(&ApiRequest::get("/api/data/preview")),
            Duration::from_secs(60)
        );
        let upload = ApiRequest::post("/api/data/upload").timeout(Duration::from_secs(120));
        assert_eq!(interceptor.effective_timeout(&upload), Duration::from_secs(120));
    }

    #[test]
    fn base_url_is_joined_without_double_slash() {
        let prepared = interceptor(60).prepare(&ApiRequest::get("/api/health")).unwrap();
        assert_eq!(prepared.url, "http://127.0.0.1:5000/api/health");
        assert!(prepared.proxy.is_none());
    }

    #[test]
    fn empty_base_url_routes_through_proxy() {
        let interceptor = RequestInterceptor::new(
            "",
            Duration::from_secs(60),
            vec![ProxyRule::new("/api", "http://backend:5000")],
        );
        assert_eq!(
            interceptor.resolve_url("/api/ml/models").unwrap(),
            "http://backend:5000/api/ml/models"
        );
        assert!(matches!(
            interceptor.resolve_url("/health"),
            Err(ClientError::InvalidConfig(_))
        ));
    }

    #[test]
    fn proxied_requests_use_rule_timeout() {
        let mut rule = ProxyRule::new("/api", "http://backend:5000");
        rule.timeout = 300;
        let interceptor = RequestInterceptor::new("", Duration::from_secs(60), vec![rule.clone()]);

        let preview = interceptor.prepare(&ApiRequest::get("/api/data/preview")).unwrap();
        assert_eq!(preview.timeout, Duration::from_secs(300));
        assert_eq!(preview.proxy, Some(rule));

        let upload = ApiRequest::post("/api/data/upload").timeout(Duration::from_secs(120));
        assert_eq!(interceptor.effective_timeout(&upload), Duration::from_secs(120));

        let train = ApiRequest::post("/api/ml/train");
        assert_eq!(interceptor.effective_timeout(&train), Duration::from_secs(600));
    }

    #[test]
    fn base_url_disables_proxy_rules() {
        let interceptor = RequestInterceptor::new(
            "http://127.0.0.1:5000",
            Duration::from_secs(60),
            vec![ProxyRule::new("/api", "http://backend:5000")],
        );
        assert!(interceptor.proxy_rule("/api/health").is_none());
        assert_eq!(
            interceptor.effective_timeout(&ApiRequest::get("/api/health")),
            Duration::from_secs(60)
        );
    }

    #[test]
    fn upload_part_guesses_content_type() {
        let part = UploadPart::new("train_file", "train.csv", b"a,b\n1,2\n".to_vec());
        assert_eq!(part.content_type, "text/csv");
    }
}
