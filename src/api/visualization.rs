//! Chart generation

use super::endpoints;
use crate::client::{ApiRequest, Envelope, Transport};
use crate::error::Result;
use serde::Serialize;

/// `POST /api/visualization/data`
pub async fn data_visualization<P: Serialize + ?Sized>(
    transport: &Transport,
    params: &P,
) -> Result<Envelope> {
    transport
        .json(ApiRequest::post(endpoints::VISUALIZATION_DATA).json(params)?)
        .await
}

/// `POST /api/visualization/model`
pub async fn model_visualization<P: Serialize + ?Sized>(
    transport: &Transport,
    params: &P,
) -> Result<Envelope> {
    transport
        .json(ApiRequest::post(endpoints::VISUALIZATION_MODEL).json(params)?)
        .await
}
