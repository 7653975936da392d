//! Dataset loading, upload, preview, preprocessing and download

use super::{endpoints, path_with};
use crate::client::{ApiRequest, BinaryPayload, Envelope, Transport, UploadPart};
use crate::error::{ClientError, Result};
use serde::Serialize;
use std::path::Path;

/// Multipart field carrying the training dataset
pub const TRAIN_FILE_FIELD: &str = "train_file";
/// Multipart field carrying the test dataset
pub const TEST_FILE_FIELD: &str = "test_file";

/// `POST /api/data/load-default`
pub async fn load_default_data(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::post(endpoints::DATA_LOAD_DEFAULT)).await
}

/// `POST /api/data/upload` (multipart) with the upload timeout budget
pub async fn upload_data(transport: &Transport, parts: Vec<UploadPart>) -> Result<Envelope> {
    let request = ApiRequest::post(endpoints::DATA_UPLOAD)
        .multipart(parts)
        .timeout(transport.timeouts().upload_duration());
    transport.json(request).await
}

/// Upload a training and/or test dataset from disk
///
/// CSV files are parsed as CSV by the backend; anything else as a spreadsheet.
pub async fn upload_files(
    transport: &Transport,
    train: Option<&Path>,
    test: Option<&Path>,
) -> Result<Envelope> {
    let mut parts = Vec::with_capacity(2);
    if let Some(path) = train {
        parts.push(UploadPart::from_path(TRAIN_FILE_FIELD, path).await?);
    }
    if let Some(path) = test {
        parts.push(UploadPart::from_path(TEST_FILE_FIELD, path).await?);
    }
    if parts.is_empty() {
        return Err(ClientError::InvalidArgument(
            "at least one of the training or test dataset is required".to_string(),
        ));
    }
    upload_data(transport, parts).await
}

/// `GET /api/data/preview`
pub async fn preview_data(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::DATA_PREVIEW)).await
}

/// `POST /api/data/preprocess`
pub async fn preprocess_data<P: Serialize + ?Sized>(
    transport: &Transport,
    params: &P,
) -> Result<Envelope> {
    transport
        .json(ApiRequest::post(endpoints::DATA_PREPROCESS).json(params)?)
        .await
}

/// `GET /api/data/download/{dataType}/{fileFormat}` (binary)
pub async fn download_data(
    transport: &Transport,
    data_type: &str,
    file_format: &str,
) -> Result<BinaryPayload> {
    let path = path_with(endpoints::DATA_DOWNLOAD, &[data_type, file_format]);
    transport.binary(ApiRequest::get(path)).await
}
