//! Request, response and row types shared by the three slices.
//!
//! Stored rows and client-facing projections are kept apart: `Credentials`
//! carries the password hash and is never serialized, while the profile types
//! returned to clients select an allow-listed set of columns.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

pub mod activity;
pub mod admin;
pub mod club;
pub mod player;

pub use activity::*;
pub use admin::*;
pub use club::*;
pub use player::*;

/// Credentials
///
/// The minimal stored row needed to authenticate an account. Queries alias the
/// role-specific columns (`club_id AS id`, `club_password AS password_hash`, ...).
#[derive(Debug, Clone, FromRow)]
pub struct Credentials {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// ChangePasswordRequest
///
/// Shared by all three roles; the account is the one named by the session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// MessageResponse
///
/// Plain acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
