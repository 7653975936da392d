//! Backend endpoint paths

/// Liveness probe
pub const HEALTH: &str = "/api/health";
/// Backend state summary
pub const SYSTEM_STATUS: &str = "/api/system/status";

/// Load the bundled default datasets
pub const DATA_LOAD_DEFAULT: &str = "/api/data/load-default";
/// Multipart dataset upload
pub const DATA_UPLOAD: &str = "/api/data/upload";
/// Dataset preview and statistics
pub const DATA_PREVIEW: &str = "/api/data/preview";
/// Dataset preprocessing
pub const DATA_PREPROCESS: &str = "/api/data/preprocess";
/// Dataset download; followed by `/{dataType}/{fileFormat}`
pub const DATA_DOWNLOAD: &str = "/api/data/download";

/// Available estimators
pub const ML_MODELS: &str = "/api/ml/models";
/// Train a single model
pub const ML_TRAIN: &str = "/api/ml/train";
/// Predict with a trained model
pub const ML_PREDICT: &str = "/api/ml/predict";
/// Evaluate a trained model
pub const ML_EVALUATE: &str = "/api/ml/evaluate";

/// Available stacking base models
pub const STACKING_MODELS: &str = "/api/stacking/models";
/// Train a stacking ensemble
pub const STACKING_TRAIN: &str = "/api/stacking/train";

/// Run an AutoML search
pub const AUTOML_RUN: &str = "/api/automl/run";

/// Dataset charts
pub const VISUALIZATION_DATA: &str = "/api/visualization/data";
/// Model charts
pub const VISUALIZATION_MODEL: &str = "/api/visualization/model";

/// Generate a report
pub const REPORTS_GENERATE: &str = "/api/reports/generate";
/// List generated reports
pub const REPORTS_LIST: &str = "/api/reports/list";
/// Report download; followed by `/{reportId}/{fileFormat}`
pub const REPORTS_DOWNLOAD: &str = "/api/reports/download";
/// Report deletion; followed by `/{reportId}`
pub const REPORTS: &str = "/api/reports";

/// Stored model artifacts
pub const MODELS_LIST: &str = "/api/models/list";
/// Model artifact download; followed by `/{modelId}`
pub const MODELS_DOWNLOAD: &str = "/api/models/download";
