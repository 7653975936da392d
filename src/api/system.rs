//! System status

use super::endpoints;
use super::types::{HealthStatus, SystemStatus};
use crate::client::{ApiRequest, Envelope, Transport};
use crate::error::Result;

/// `GET /api/health`
pub async fn health(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::HEALTH)).await
}

/// `GET /api/health`, parsed
pub async fn health_status(transport: &Transport) -> Result<HealthStatus> {
    health(transport).await?.parse()
}

/// `GET /api/system/status`
pub async fn system_status(transport: &Transport) -> Result<Envelope> {
    transport.json(ApiRequest::get(endpoints::SYSTEM_STATUS)).await
}

/// `GET /api/system/status`, parsed
pub async fn system_status_typed(transport: &Transport) -> Result<SystemStatus> {
    system_status(transport).await?.parse()
}
