//! Request bodies understood by the backend
//!
//! Every struct carries a flattened `extra` map, so keys the backend learns
//! later can be passed without a release of this crate. Unset options are
//! omitted and the backend applies its own defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /api/data/preprocess`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreprocessParams {
    /// Steps to run, in order (missing-value filling, outlier handling, ...)
    #[serde(default)]
    pub methods: Vec<String>,
    /// How missing values are filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_method: Option<String>,
    /// Constant used by the fixed-value fill
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<f64>,
    /// Outlier detection method (e.g. `IQR`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlier_method: Option<String>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/ml/train`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainParams {
    /// Model key from `GET /api/ml/models`
    pub model_type: String,
    /// Columns to predict
    pub target_columns: Vec<String>,
    /// Validation split fraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_size: Option<f64>,
    /// Seed for the split and the estimator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_state: Option<u64>,
    /// Estimator hyper-parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_params: Option<Map<String, Value>>,
    /// Run a grid search over `model_params`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_grid_search: Option<bool>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrainParams {
    /// Train `model_type` against `target_columns` with backend defaults
    pub fn new(model_type: impl Into<String>, target_columns: Vec<String>) -> Self {
        Self {
            model_type: model_type.into(),
            target_columns,
            ..Self::default()
        }
    }
}

/// Body of `POST /api/ml/predict` and `POST /api/ml/evaluate`
///
/// Without `model_id` the backend uses the most recently trained model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelQuery {
    /// Trained model to use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Include the input features alongside the predictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_features: Option<bool>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/stacking/train`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackingParams {
    /// Columns to predict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_columns: Option<Vec<String>>,
    /// Level-0 model keys (e.g. `rf`, `gbr`, `lr`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_models: Vec<String>,
    /// Level-1 model name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_model: Option<String>,
    /// Cross-validation folds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_folds: Option<u32>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/automl/run`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoMlParams {
    /// Columns to predict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_columns: Option<Vec<String>>,
    /// `grid` or `random`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_method: Option<String>,
    /// Cross-validation folds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_folds: Option<u32>,
    /// Scoring function name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<String>,
    /// `fast` or `thorough`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_mode: Option<String>,
    /// Iterations for the random search
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iter: Option<u32>,
    /// Candidate model keys; all when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/visualization/data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataVisualizationParams {
    /// `train` or `test`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Chart family (e.g. `distribution`, `correlation`, `scatter`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Columns to plot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    /// Rendering backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    /// X axis column for scatter plots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_column: Option<String>,
    /// Y axis column for scatter plots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_column: Option<String>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/visualization/model`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelVisualizationParams {
    /// Trained model to plot; the current model when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Chart family (e.g. `prediction`, `feature_importance`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Rendering backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/reports/generate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportParams {
    /// Model the report describes; the current model when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Report flavour (e.g. `comprehensive`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
    /// Output format (`html`, `pdf`, `docx`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Embed charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_charts: Option<bool>,
    /// Project name on the title page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Project description on the title page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    /// Author line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Additional keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
