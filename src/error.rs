//! Error types and handling for the mldash client
//!
//! Every failure a wrapper call can produce flows through [`ClientError`]. The
//! transport and business variants display exactly the user-facing message, so
//! callers can show `err.to_string()` without further formatting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mldash operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Message used when a failed envelope carries no `message` field
pub const DEFAULT_BUSINESS_MESSAGE: &str = "Request failed";

/// Message used when a request was sent but no response ever arrived
pub const NO_RESPONSE_MESSAGE: &str =
    "Network connection timed out, please check the network or server status";

/// Message used when the request could not even be built or dispatched
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Comprehensive error types for mldash operations
#[derive(Error, Debug)]
pub enum ClientError {
    // ═══════════════════════════════════════════════════════════════
    // Backend & Transport Errors
    // ═══════════════════════════════════════════════════════════════
    /// Server answered 2xx with `success: false`
    #[error("{message}")]
    Business { message: String },

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Request was dispatched but no response was received (timeout, refused, reset)
    #[error("{0}")]
    Network(String),

    /// Request could not be built or dispatched
    #[error("{0}")]
    RequestSetup(String),

    /// Response body did not match the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    // ═══════════════════════════════════════════════════════════════
    // Configuration & File Errors
    // ═══════════════════════════════════════════════════════════════
    /// Failed to read configuration file
    #[error("Failed to read config from {path}: {reason}")]
    ConfigRead { path: PathBuf, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file not found
    #[error("Configuration not found. Run 'mldash config init' to create one")]
    NoConfig,

    /// Failed to write configuration file
    #[error("Failed to write config to {path}: {reason}")]
    ConfigWrite { path: PathBuf, reason: String },

    /// Directory operation failed
    #[error("Directory operation failed: {path}: {reason}")]
    DirError { path: PathBuf, reason: String },

    /// File operation failed
    #[error("File operation failed: {path}: {reason}")]
    FileError { path: PathBuf, reason: String },

    // ═══════════════════════════════════════════════════════════════
    // Serialization Errors
    // ═══════════════════════════════════════════════════════════════
    /// Failed to serialize data
    #[error("Serialization failed: {0}")]
    SerializationError(String),

    /// Failed to deserialize data
    #[error("Deserialization failed: {0}")]
    DeserializationError(String),

    // ═══════════════════════════════════════════════════════════════
    // Other Errors
    // ═══════════════════════════════════════════════════════════════
    /// Invalid input argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// Human-readable category for an HTTP status code
    #[must_use]
    pub fn status_category(status: u16) -> String {
        match status {
            400 => "Invalid request parameters".to_string(),
            401 => "Unauthorized access".to_string(),
            403 => "Access denied".to_string(),
            404 => "Requested resource not found".to_string(),
            500 => "Internal server error".to_string(),
            other => format!("Server error {other}"),
        }
    }

    /// Get the exit code for this error
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NoConfig => 1,
            Self::InvalidArgument(_) => 2,
            Self::Business { .. } => 3,
            Self::Network(_) | Self::RequestSetup(_) => 4,
            Self::Status { .. } | Self::InvalidResponse(_) => 5,
            Self::ConfigRead { .. } | Self::InvalidConfig(_) | Self::ConfigWrite { .. } => 6,
            Self::FileError { .. } | Self::DirError { .. } => 7,
            _ => 1,
        }
    }

    /// Whether the backend rejected the request at the business level
    #[must_use]
    pub const fn is_business(&self) -> bool {
        matches!(self, Self::Business { .. })
    }

    /// Whether the error came out of the transport (and may already have been shown)
    #[must_use]
    pub const fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Business { .. } | Self::Status { .. } | Self::Network(_) | Self::RequestSetup(_)
        )
    }

    /// HTTP status carried by the error, if the server answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The user-facing message for this error
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Render the error in the backend's envelope shape
    ///
    /// For callers that prefer a resolved `{success: false, message}` value over
    /// a propagated error. The wrappers themselves never do this.
    #[must_use]
    pub fn to_envelope(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "message": self.message(),
        })
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::FileError {
            path: PathBuf::from("<unknown>"),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_eof() {
            Self::DeserializationError(format!("JSON syntax error: {err}"))
        } else {
            Self::DeserializationError(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
