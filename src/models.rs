//! Request and response models for the API.
//!
//! All models use serde for serialization/deserialization. Field names are
//! camelCase on the wire and in the persisted account file.

use serde::{Deserialize, Serialize};

// ============================================================================
// Account
// ============================================================================

/// An account as persisted in the backing file.
///
/// `credential_secret` holds either the password verbatim or an Argon2id PHC
/// hash, depending on the credential scheme configured at signup time. It is
/// never serialized into an API response; handlers return the response models
/// below instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    pub credential_secret: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub created_at: u64,
}

// ============================================================================
// Auth Models
// ============================================================================

/// Request to create an account.
///
/// Required fields are `Option` so an absent field reaches the handler's own
/// validation (400 with a readable message) instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Request to authenticate with existing credentials.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response after successful signup or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

// ============================================================================
// Profile Models
// ============================================================================

/// Request to update profile fields. An omitted field keeps its current value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Response after a profile update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub first_name: String,
    pub last_name: String,
}
