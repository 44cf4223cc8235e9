//! User profile and authentication models.

use serde::{Deserialize, Serialize};

/// Gender values accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

/// A named map location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// User profile as served by `/profiles`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub middlename: Option<String>,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub additional_emails: Vec<String>,
    /// Only sent on registration; never returned by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Fitness level 0..=4
    #[serde(default)]
    pub fitness: Option<i32>,
    #[serde(default)]
    pub passports: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_location: Option<Location>,
}

impl UserProfile {
    /// Locations to pin on the search map, public location first.
    pub fn map_pins(&self) -> Vec<&Location> {
        self.public_location
            .iter()
            .chain(self.private_location.iter())
            .collect()
    }
}

/// Credentials for `/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(alias = "userId")]
    pub user_id: u64,
}

/// Body of the profile email endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailUpdate {
    pub primary_email: String,
    #[serde(default)]
    pub additional_emails: Vec<String>,
}

/// Body of the password change endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordUpdate {
    pub old_password: String,
    pub new_password: String,
    pub repeat_password: String,
}
