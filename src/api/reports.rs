//! Analysis reports

use super::types::ReportList;
use super::{endpoints, path_with};
use crate::client::{ApiRequest, BinaryPayload, Envelope, Transport};
use crate::error::Result;
use serde::Serialize;

/// `POST /api/reports/generate`
pub async fn generate_report<P: Serialize + ?Sized>(
    transport: &Transport,
    params: &P,
) -> Result<Envelope> {
    transport
        .json(ApiRequest::post(endpoints::REPORTS_GENERATE).json(params)?)
        .await
}

/// `GET /api/reports/list`
pub async fn list_reports(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::REPORTS_LIST)).await
}

/// `GET /api/reports/list`, parsed
pub async fn report_list(transport: &Transport) -> Result<ReportList> {
    list_reports(transport).await?.parse()
}

/// `GET /api/reports/download/{reportId}/{fileFormat}` (binary)
pub async fn download_report(
    transport: &Transport,
    report_id: &str,
    file_format: &str,
) -> Result<BinaryPayload> {
    let path = path_with(endpoints::REPORTS_DOWNLOAD, &[report_id, file_format]);
    transport.binary(ApiRequest::get(path)).await
}

/// `DELETE /api/reports/{reportId}`
pub async fn delete_report(transport: &Transport, report_id: &str) -> Result<Envelope> {
    let path = path_with(endpoints::REPORTS, &[report_id]);
    transport.json(ApiRequest::delete(path)).await
}
