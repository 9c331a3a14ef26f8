use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// ClubProfile
///
/// Allow-listed projection of the `clubs` table, used for the club's own profile
/// and for club listings shown to players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClubProfile {
    pub club_id: i64,
    pub club_name: Option<String>,
    pub club_email: String,
    pub club_image: Option<String>,
    pub club_address: Option<String>,
    pub manager_name: Option<String>,
    pub manager_image: Option<String>,
    pub manager_email: Option<String>,
    pub manager_mobile: Option<String>,
    pub manager_address: Option<String>,
    #[ts(type = "string")]
    pub registered_date: NaiveDate,
}

/// ClubRegistrationRequest
///
/// Input payload for `POST /api/club/clubRegistration`. Only the email and the
/// password are mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClubRegistrationRequest {
    #[validate(email(message = "Invalid email address"))]
    pub club_email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub club_password: String,
    pub club_name: Option<String>,
    pub club_image: Option<String>,
    pub club_address: Option<String>,
    pub manager_name: Option<String>,
    pub manager_image: Option<String>,
    pub manager_email: Option<String>,
    pub manager_mobile: Option<String>,
    pub manager_address: Option<String>,
}

impl ClubRegistrationRequest {
    /// Swaps the plaintext password for its hash.
    pub fn into_new_club(self, password_hash: String) -> NewClub {
        NewClub {
            club_name: self.club_name,
            club_email: self.club_email,
            club_image: self.club_image,
            club_address: self.club_address,
            manager_name: self.manager_name,
            manager_image: self.manager_image,
            manager_email: self.manager_email,
            manager_mobile: self.manager_mobile,
            manager_address: self.manager_address,
            password_hash,
        }
    }
}

/// NewClub
///
/// Row to insert at registration.
#[derive(Debug, Clone)]
pub struct NewClub {
    pub club_name: Option<String>,
    pub club_email: String,
    pub club_image: Option<String>,
    pub club_address: Option<String>,
    pub manager_name: Option<String>,
    pub manager_image: Option<String>,
    pub manager_email: Option<String>,
    pub manager_mobile: Option<String>,
    pub manager_address: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubLoginRequest {
    pub club_email: String,
    pub club_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ClubLoginResponse {
    pub token: String,
    pub club: ClubProfile,
}

/// ClubUpdateProfileRequest
///
/// Partial update of the editable club fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClubUpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Club name cannot be empty"))]
    pub club_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Manager name cannot be empty"))]
    pub manager_name: Option<String>,
}

/// SearchPlayersRequest
///
/// Free-text term matched against player id, name, email, mobile and address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlayersRequest {
    pub search_query: String,
}
