use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// Player
///
/// Projection of the `players` table returned to clubs and to the player.
/// The lifecycle flags are included so a club can tell the roster states apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub player_id: i64,
    pub club_id: i64,
    pub player_name: String,
    pub player_email: String,
    pub player_mobile: Option<String>,
    pub player_image: Option<String>,
    pub player_age: Option<i32>,
    pub player_country: Option<String>,
    pub player_position: Option<String>,
    pub player_address: Option<String>,
    #[ts(type = "string")]
    pub registered_date: NaiveDate,
    pub is_approved: bool,
    pub is_active: bool,
    pub is_suspended: bool,
}

/// PlayerRegistrationRequest
///
/// Input payload for `POST /api/player/playerRegistration`. The player joins
/// `club_id` in the unapproved state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRegistrationRequest {
    pub club_id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub player_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub player_email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub player_password: String,
    pub player_mobile: Option<String>,
    pub player_image: Option<String>,
    #[validate(range(min = 1, max = 120, message = "Age is out of range"))]
    pub player_age: Option<i32>,
    pub player_country: Option<String>,
    pub player_position: Option<String>,
    pub player_address: Option<String>,
}

impl PlayerRegistrationRequest {
    /// Swaps the plaintext password for its hash.
    pub fn into_new_player(self, password_hash: String) -> NewPlayer {
        NewPlayer {
            club_id: self.club_id,
            player_name: self.player_name,
            player_email: self.player_email,
            player_mobile: self.player_mobile,
            player_image: self.player_image,
            player_age: self.player_age,
            player_country: self.player_country,
            player_position: self.player_position,
            player_address: self.player_address,
            password_hash,
        }
    }
}

/// NewPlayer
///
/// Row to insert at registration.
#[derive(Debug, Clone)]
pub struct NewPlayer {
    pub club_id: i64,
    pub player_name: String,
    pub player_email: String,
    pub player_mobile: Option<String>,
    pub player_image: Option<String>,
    pub player_age: Option<i32>,
    pub player_country: Option<String>,
    pub player_position: Option<String>,
    pub player_address: Option<String>,
    pub password_hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLoginRequest {
    pub player_email: String,
    pub player_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PlayerLoginResponse {
    pub token: String,
    pub player: Player,
}

/// PlayerUpdateProfileRequest
///
/// Partial update of the player's own contact and sporting details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub player_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 120, message = "Age is out of range"))]
    pub player_age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_address: Option<String>,
}

/// PlayerRef
///
/// Body of every roster action that targets one player, and the response of
/// the state-changing ones (approve, suspend, unsuspend, delete).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    pub player_id: i64,
}
