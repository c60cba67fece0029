use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Location;

/// Request to create a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 20))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 18, max = 100))]
    pub age: u8,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[validate(nested)]
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
}

impl CreateUserRequest {
    /// Apply storage normalization: trimmed username and bio, lowercase email
    pub fn normalize(mut self) -> Self {
        self.username = self.username.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.bio = self.bio.map(|bio| bio.trim().to_string());
        self
    }
}

/// Partial update of a user; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 20))]
    #[serde(default)]
    pub username: Option<String>,
    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,
    #[validate(range(min = 18, max = 100))]
    #[serde(default)]
    pub age: Option<u8>,
    #[validate(length(max = 500))]
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[validate(nested)]
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
}

impl UpdateUserRequest {
    pub fn normalize(mut self) -> Self {
        self.username = self.username.map(|u| u.trim().to_string());
        self.email = self.email.map(|e| e.trim().to_lowercase());
        self.bio = self.bio.map(|b| b.trim().to_string());
        self
    }
}

/// Query string for listing users
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListUsersQuery {
    #[validate(range(min = 1))]
    #[serde(default = "default_page")]
    pub page: u32,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(rename = "isActive", default)]
    pub is_active: Option<bool>,
}

fn default_page() -> u32 {
    1
}

/// Query string for the matches endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchesQuery {
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query string for proximity lookups
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(exclusive_min = 0.0, max = 20000.0))]
    #[serde(rename = "radiusKm", default = "default_radius_km")]
    pub radius_km: f64,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_radius_km() -> f64 {
    10.0
}
