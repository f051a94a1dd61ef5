use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{DashboardStats, PortfolioSnapshot};

/// Response for the dashboard statistics endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub stats: DashboardStats,
    #[serde(rename = "fetchedAt")]
    pub fetched_at: chrono::DateTime<chrono::Utc>,
}

/// Response carrying one user's raw aggregated portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioResponse {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(flatten)]
    pub snapshot: PortfolioSnapshot,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub id: Uuid,
}
