use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// AdminProfile
///
/// Allow-listed projection of the `admins` table. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub admin_id: i64,
    pub admin_name: String,
    pub admin_email: String,
    pub admin_image: Option<String>,
    // National identity number; unique among live admins.
    pub admin_aadhar: Option<String>,
    pub admin_mobile: Option<String>,
    pub admin_address: Option<String>,
    #[ts(type = "string")]
    pub registered_date: NaiveDate,
}

/// AdminRegistrationRequest
///
/// Input payload for `POST /api/admin/adminRegistration`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminRegistrationRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub admin_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub admin_email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub admin_password: String,
    pub admin_image: Option<String>,
    pub admin_aadhar: Option<String>,
    pub admin_mobile: Option<String>,
    pub admin_address: Option<String>,
}

impl AdminRegistrationRequest {
    /// Swaps the plaintext password for its hash.
    pub fn into_new_admin(self, password_hash: String) -> NewAdmin {
        NewAdmin {
            admin_name: self.admin_name,
            admin_email: self.admin_email,
            admin_image: self.admin_image,
            admin_aadhar: self.admin_aadhar,
            admin_mobile: self.admin_mobile,
            admin_address: self.admin_address,
            password_hash,
        }
    }
}

/// NewAdmin
///
/// Row to insert at registration. Only ever holds the hashed password.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub admin_name: String,
    pub admin_email: String,
    pub admin_image: Option<String>,
    pub admin_aadhar: Option<String>,
    pub admin_mobile: Option<String>,
    pub admin_address: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub admin_email: String,
    pub admin_password: String,
}

/// AdminLoginResponse
///
/// Session token plus the admin's profile.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

/// AdminUpdateProfileRequest
///
/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminUpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub admin_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_aadhar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_address: Option<String>,
}
