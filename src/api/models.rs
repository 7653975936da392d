//! Stored model artifacts

use super::{endpoints, path_with};
use crate::client::{ApiRequest, BinaryPayload, Envelope, Transport};
use crate::error::Result;

/// `GET /api/models/list`
pub async fn list_models(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::MODELS_LIST)).await
}

/// `GET /api/models/download/{modelId}` (binary)
pub async fn download_model(transport: &Transport, model_id: &str) -> Result<BinaryPayload> {
    let path = path_with(endpoints::MODELS_DOWNLOAD, &[model_id]);
    transport.binary(ApiRequest::get(path)).await
}
