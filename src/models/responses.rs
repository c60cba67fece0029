use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::{Location, NearbyUser, UserProfile};

/// Paginated list of users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub data: Vec<UserProfile>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl UserListResponse {
    pub fn new(data: Vec<UserProfile>, total: i64, page: u32, limit: u32) -> Self {
        let per_page = i64::from(limit.max(1));
        Self {
            data,
            total,
            page,
            limit,
            total_pages: (total + per_page - 1) / per_page,
        }
    }
}

/// Response for a proximity lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    pub center: Location,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    pub users: Vec<NearbyUser>,
    pub total: usize,
}

/// Response for a deleted user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
    #[serde(rename = "deletedId")]
    pub deleted_id: Uuid,
}

/// Service banner returned at the root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub environment: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime: f64,
    pub database: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
