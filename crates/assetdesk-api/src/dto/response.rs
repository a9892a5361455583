//! Response DTOs.

use serde::{Deserialize, Serialize};

use assetdesk_entity::notification::Notification;
use assetdesk_service::GenerationReport;

/// Acknowledges a write that returns no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
}

impl SuccessResponse {
    /// A successful acknowledgement.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active record-store backend.
    pub database: String,
}

/// Result of `POST /api/notifications/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,
    /// Number of notifications created by this pass.
    pub count: usize,
    pub notifications: Vec<Notification>,
}

impl From<GenerationReport> for GenerateResponse {
    fn from(report: GenerationReport) -> Self {
        Self {
            success: true,
            count: report.count,
            notifications: report.notifications,
        }
    }
}
