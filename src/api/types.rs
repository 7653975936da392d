//! Typed views over envelopes returned by the backend

use serde::{Deserialize, Serialize};

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` when the service is up
    pub status: String,
    /// Server time (ISO 8601)
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    /// Whether the backend reports itself healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// `GET /api/system/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// A training dataset is loaded
    #[serde(default)]
    pub train_data_loaded: bool,
    /// A test dataset is loaded
    #[serde(default)]
    pub test_data_loaded: bool,
    /// Number of trained models held by the backend
    #[serde(default)]
    pub trained_models: usize,
    /// Model used when a call omits `model_id`
    #[serde(default)]
    pub current_model: Option<String>,
    /// Number of recorded training runs
    #[serde(default)]
    pub training_history: usize,
    /// Rows × columns of the training dataset
    #[serde(default)]
    pub train_data_shape: Option<(usize, usize)>,
    /// Rows × columns of the test dataset
    #[serde(default)]
    pub test_data_shape: Option<(usize, usize)>,
}

/// One entry of `GET /api/ml/models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Key passed as `model_type`
    pub key: String,
    /// Display name
    pub name: String,
    /// Tunable hyper-parameter names
    #[serde(default)]
    pub params: Vec<String>,
}

/// `GET /api/ml/models`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    /// Available estimators
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// One entry of `GET /api/reports/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Report id used for download and delete
    pub id: String,
    /// Generation time
    pub timestamp: String,
    /// Report flavour
    #[serde(rename = "type")]
    pub kind: String,
    /// Output format
    pub format: String,
}

/// `GET /api/reports/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportList {
    /// Reports, newest first
    #[serde(default)]
    pub reports: Vec<ReportSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Envelope;

    #[test]
    fn system_status_with_shapes() {
        let envelope = Envelope::new(serde_json::json!({
            "train_data_loaded": true,
            "test_data_loaded": false,
            "trained_models": 2,
            "current_model": "random_forest_20240101_120000",
            "training_history": 3,
            "train_data_shape": [1200, 18],
        }));
        let status: SystemStatus = envelope.parse().unwrap();
        assert_eq!(status.train_data_shape, Some((1200, 18)));
        assert_eq!(status.test_data_shape, None);
        assert_eq!(status.trained_models, 2);
    }

    #[test]
    fn sparse_system_status_uses_defaults() {
        let envelope = Envelope::new(serde_json::json!({"train_data_loaded": true}));
        let status: SystemStatus = envelope.parse().unwrap();
        assert!(status.train_data_loaded);
        assert!(!status.test_data_loaded);
        assert_eq!(status.trained_models, 0);
        assert_eq!(status.training_history, 0);
        assert_eq!(status.current_model, None);
    }

    #[test]
    fn report_list_parses_type_field() {
        let envelope = Envelope::new(serde_json::json!({
            "success": true,
            "reports": [
                {"id": "1a2b", "timestamp": "2024-01-01T12:00:00", "type": "comprehensive", "format": "html"}
            ],
        }));
        let list: ReportList = envelope.parse().unwrap();
        assert_eq!(list.reports[0].kind, "comprehensive");
    }
}
