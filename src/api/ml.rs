//! Model training, prediction and evaluation, stacking ensembles, AutoML

use super::endpoints;
use super::types::ModelCatalog;
use crate::client::{ApiRequest, Envelope, Transport};
use crate::error::Result;
use serde::Serialize;

// ─── single models ──────────────────────────────────────────────────

/// `GET /api/ml/models`
pub async fn available_models(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::ML_MODELS)).await
}

/// `GET /api/ml/models`, parsed
pub async fn model_catalog(transport: &Transport) -> Result<ModelCatalog> {
    available_models(transport).await?.parse()
}

/// `POST /api/ml/train` with the training timeout budget
pub async fn train_model<P: Serialize + ?Sized>(transport: &Transport, params: &P) -> Result<Envelope> {
    let request = ApiRequest::post(endpoints::ML_TRAIN)
        .json(params)?
        .timeout(transport.timeouts().training_duration());
    transport.json(request).await
}

/// `POST /api/ml/predict`
pub async fn predict<P: Serialize + ?Sized>(transport: &Transport, params: &P) -> Result<Envelope> {
    transport
        .json(ApiRequest::post(endpoints::ML_PREDICT).json(params)?)
        .await
}

/// `POST /api/ml/evaluate`
pub async fn evaluate_model<P: Serialize + ?Sized>(
    transport: &Transport,
    params: &P,
) -> Result<Envelope> {
    transport
        .json(ApiRequest::post(endpoints::ML_EVALUATE).json(params)?)
        .await
}

// ─── stacking ensembles ─────────────────────────────────────────────

/// `GET /api/stacking/models`
pub async fn stacking_models(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::STACKING_MODELS)).await
}

/// `POST /api/stacking/train` with the training timeout budget
pub async fn train_stacking<P: Serialize + ?Sized>(
    transport: &Transport,
    params: &P,
) -> Result<Envelope> {
    let request = ApiRequest::post(endpoints::STACKING_TRAIN)
        .json(params)?
        .timeout(transport.timeouts().training_duration());
    transport.json(request).await
}

// ─── AutoML ─────────────────────────────────────────────────────────

/// `POST /api/automl/run` with the AutoML timeout budget
pub async fn run_automl<P: Serialize + ?Sized>(transport: &Transport, params: &P) -> Result<Envelope> {
    let request = ApiRequest::post(endpoints::AUTOML_RUN)
        .json(params)?
        .timeout(transport.timeouts().automl_duration());
    transport.json(request).await
}
