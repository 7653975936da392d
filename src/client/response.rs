//! Response envelopes and the response-phase interceptor

use super::request::{is_long_running, ResponseKind};
use crate::config::ProxyRule;
use crate::error::{
    ClientError, Result, DEFAULT_BUSINESS_MESSAGE, NETWORK_ERROR_MESSAGE, NO_RESPONSE_MESSAGE,
};
use crate::notify::{Notice, Notifier};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The backend's uniform JSON response, kept exactly as received
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Envelope(Value);

impl Envelope {
    /// Wrap a JSON value
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The `success` flag, when present and boolean
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.0.get("success").and_then(Value::as_bool)
    }

    /// Business failure: `success` is present and exactly `false`
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.success() == Some(false)
    }

    /// The `message` field, when it is a string
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Any top-level field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Deserialize the whole envelope into an endpoint-specific type
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        T::deserialize(&self.0).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Borrow the raw value
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Take the raw value
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// A file returned by a download endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    /// HTTP status
    pub status: u16,
    /// `Content-Type` header
    pub content_type: Option<String>,
    /// File name from `Content-Disposition`, when the server sent one
    pub file_name: Option<String>,
    /// Body bytes
    pub bytes: Vec<u8>,
}

impl BinaryPayload {
    /// Body length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the body is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Final component of the server file name, or `fallback`
    ///
    /// Directory parts are dropped; names with no usable final component
    /// (empty, `.`, `..`) give `fallback`.
    #[must_use]
    pub fn file_name_or(&self, fallback: &str) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_name())
            .map_or_else(|| fallback.to_string(), |name| name.to_string_lossy().into_owned())
    }

    /// Write the body to `path`
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, &self.bytes)
            .await
            .map_err(|e| ClientError::FileError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

/// Normalized result of one call
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Envelope that passed inspection
    Json(Envelope),
    /// Untouched download
    Binary(BinaryPayload),
}

impl ApiResponse {
    /// Expect an envelope
    pub fn into_envelope(self) -> Result<Envelope> {
        match self {
            Self::Json(envelope) => Ok(envelope),
            Self::Binary(_) => Err(ClientError::InvalidResponse(
                "expected a JSON envelope, got a binary body".to_string(),
            )),
        }
    }

    /// Expect a binary payload
    pub fn into_binary(self) -> Result<BinaryPayload> {
        match self {
            Self::Binary(payload) => Ok(payload),
            Self::Json(_) => Err(ClientError::InvalidResponse(
                "expected a binary body, got a JSON envelope".to_string(),
            )),
        }
    }
}

/// What the network handed back before any policy is applied
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    /// HTTP status
    pub status: u16,
    /// `Content-Type` header
    pub content_type: Option<String>,
    /// `Content-Disposition` header
    pub content_disposition: Option<String>,
    /// Body bytes
    pub body: Vec<u8>,
}

/// Response-phase policy: envelope normalization, status mapping, notices
#[derive(Clone)]
pub struct ResponseInterceptor {
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for ResponseInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseInterceptor").finish_non_exhaustive()
    }
}

impl ResponseInterceptor {
    /// Create an interceptor reporting through `notifier`
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Apply the response policy to a received response
    pub fn on_response(&self, path: &str, kind: ResponseKind, raw: RawResponse) -> Result<ApiResponse> {
        info!(status = raw.status, path, "response");

        if !(200..300).contains(&raw.status) {
            return Err(self.on_status_error(path, kind, &raw));
        }

        if kind == ResponseKind::Binary {
            return Ok(ApiResponse::Binary(BinaryPayload {
                status: raw.status,
                file_name: raw
                    .content_disposition
                    .as_deref()
                    .and_then(attachment_file_name),
                content_type: raw.content_type,
                bytes: raw.body,
            }));
        }

        let envelope = Envelope::new(decode_body(&raw.body));
        if envelope.is_failure() {
            let message = envelope
                .message()
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_BUSINESS_MESSAGE)
                .to_string();
            warn!(path, message = %message, "business failure");
            self.notifier.notify(&Notice::error(message.clone()));
            return Err(ClientError::Business { message });
        }

        Ok(ApiResponse::Json(envelope))
    }

    /// Map a non-2xx response to a categorized error
    ///
    /// A server-supplied `message` wins over the category, except for binary
    /// requests whose bodies are never inspected.
    pub fn on_status_error(&self, path: &str, kind: ResponseKind, raw: &RawResponse) -> ClientError {
        let mut message = ClientError::status_category(raw.status);
        if kind == ResponseKind::Json {
            if let Some(server) = decode_body(&raw.body)
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
            {
                message = server.to_string();
            }
        }

        error!(status = raw.status, path, message = %message, "response error");
        self.notify_transport_failure(path, &message);
        ClientError::Status {
            status: raw.status,
            message,
        }
    }

    /// Map a failure where no response was received
    pub fn on_transport_error(&self, path: &str, err: &reqwest::Error) -> ClientError {
        error!(path, error = %err, "request error");
        if err.is_builder() {
            self.notify_transport_failure(path, NETWORK_ERROR_MESSAGE);
            ClientError::RequestSetup(NETWORK_ERROR_MESSAGE.to_string())
        } else {
            self.notify_transport_failure(path, NO_RESPONSE_MESSAGE);
            ClientError::Network(NO_RESPONSE_MESSAGE.to_string())
        }
    }

    /// Map a request that could not be assembled (e.g. a malformed multipart part)
    pub fn on_setup_error(&self, path: &str, reason: &str) -> ClientError {
        error!(path, reason, "request setup failed");
        self.notify_transport_failure(path, NETWORK_ERROR_MESSAGE);
        ClientError::RequestSetup(NETWORK_ERROR_MESSAGE.to_string())
    }

    /// Map a proxied request whose upstream could not be reached
    pub fn on_proxy_error(&self, path: &str, rule: &ProxyRule, err: &reqwest::Error) -> ClientError {
        error!(path, target = %rule.target, error = %err, "proxy error");
        let mapped = rule.unreachable(&err.to_string());
        self.notify_transport_failure(path, &mapped.message());
        mapped
    }

    // Long-running callers present their own failure handling.
    fn notify_transport_failure(&self, path: &str, message: &str) {
        if !is_long_running(path) {
            self.notifier.notify(&Notice::error(message));
        }
    }
}

/// Decode a body as JSON, falling back to a string value for anything else
fn decode_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// File name from a `Content-Disposition: attachment; filename=...` header
fn attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;

    fn interceptor() -> (ResponseInterceptor, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        (ResponseInterceptor::new(notifier.clone()), notifier)
    }

    fn json(status: u16, body: &Value) -> RawResponse {
        RawResponse {
            status,
            content_type: Some("application/json".to_string()),
            content_disposition: None,
            body: serde_json::to_vec(body).unwrap(),
        }
    }

    #[test]
    fn success_envelope_is_returned_unchanged() {
        let (interceptor, notifier) = interceptor();
        let body = serde_json::json!({"success": true, "models": ["rf", "svr"]});
        let response = interceptor
            .on_response("/api/ml/models", ResponseKind::Json, json(200, &body))
            .unwrap();
        assert_eq!(response.into_envelope().unwrap().into_value(), body);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn envelope_without_success_flag_resolves() {
        let (interceptor, _) = interceptor();
        let body = serde_json::json!({"status": "healthy"});
        let envelope = interceptor
            .on_response("/api/health", ResponseKind::Json, json(200, &body))
            .unwrap()
            .into_envelope()
            .unwrap();
        assert_eq!(envelope.success(), None);
        assert_eq!(envelope.get("status").and_then(Value::as_str), Some("healthy"));
    }

    #[test]
    fn failed_envelope_becomes_business_error() {
        let (interceptor, notifier) = interceptor();
        let body = serde_json::json!({"success": false, "message": "X"});
        let err = interceptor
            .on_response("/api/ml/predict", ResponseKind::Json, json(200, &body))
            .unwrap_err();
        assert_eq!(err.to_string(), "X");
        assert!(err.is_business());
        assert_eq!(notifier.notices()[0].message, "X");
    }

    #[test]
    fn failed_envelope_without_message_uses_default() {
        let (interceptor, _) = interceptor();
        let body = serde_json::json!({"success": false});
        let err = interceptor
            .on_response("/api/ml/predict", ResponseKind::Json, json(200, &body))
            .unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_BUSINESS_MESSAGE);
    }

    #[test]
    fn binary_body_is_never_inspected() {
        let (interceptor, _) = interceptor();
        let raw = RawResponse {
            status: 200,
            content_type: Some("text/csv".to_string()),
            content_disposition: Some("attachment; filename=\"test_data.csv\"".to_string()),
            body: br#"{"success": false, "message": "looks like an envelope"}"#.to_vec(),
        };
        let payload = interceptor
            .on_response("/api/data/download/test/csv", ResponseKind::Binary, raw.clone())
            .unwrap()
            .into_binary()
            .unwrap();
        assert_eq!(payload.bytes, raw.body);
        assert_eq!(payload.file_name.as_deref(), Some("test_data.csv"));
    }

    #[test]
    fn status_error_prefers_server_message() {
        let (interceptor, _) = interceptor();
        let body = serde_json::json!({"success": false, "message": "No trained model available"});
        let err = interceptor
            .on_response("/api/ml/evaluate", ResponseKind::Json, json(400, &body))
            .unwrap_err();
        assert_eq!(err.to_string(), "No trained model available");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn status_error_without_message_uses_category() {
        let (interceptor, notifier) = interceptor();
        let raw = RawResponse {
            status: 404,
            ..RawResponse::default()
        };
        let err = interceptor
            .on_response("/api/reports/list", ResponseKind::Json, raw)
            .unwrap_err();
        assert_eq!(err.to_string(), "Requested resource not found");
        assert_eq!(notifier.notices().len(), 1);
    }

    #[test]
    fn long_running_status_errors_are_not_notified() {
        let (interceptor, notifier) = interceptor();
        let err = interceptor
            .on_response("/api/automl/run", ResponseKind::Json, json(500, &Value::Null))
            .unwrap_err();
        assert_eq!(err.to_string(), "Internal server error");
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn setup_errors_are_notified() {
        let (interceptor, notifier) = interceptor();
        let err = interceptor.on_setup_error("/api/data/upload", "invalid mime type");
        assert!(matches!(&err, ClientError::RequestSetup(m) if m == NETWORK_ERROR_MESSAGE));
        assert_eq!(notifier.notices()[0].message, NETWORK_ERROR_MESSAGE);

        let _ = interceptor.on_setup_error("/api/ml/train", "invalid mime type");
        assert_eq!(notifier.notices().len(), 1);
    }

    #[test]
    fn content_disposition_parsing() {
        assert_eq!(
            attachment_file_name("attachment; filename=analysis_report_1a2b3c4d.html").as_deref(),
            Some("analysis_report_1a2b3c4d.html")
        );
        assert_eq!(attachment_file_name("inline"), None);
    }
}
