//! News, matches, injuries, notifications and leave requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use validator::Validate;

/// FootballNews
///
/// A news item authored by an admin, from the `football_news` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FootballNews {
    pub football_news_id: i64,
    pub admin_id: i64,
    pub news_title: String,
    pub news_content: String,
    pub news_image: Option<String>,
    #[ts(type = "string")]
    pub added_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddNewsRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub news_title: String,
    #[validate(length(min = 1, message = "Content is required"))]
    pub news_content: String,
    pub news_image: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsRef {
    pub football_news_id: i64,
}

/// Match
///
/// A fixture from the `matches` table. Points are meaningful once `end_status` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub match_id: i64,
    pub home_team: String,
    pub away_team: String,
    pub match_venue: Option<String>,
    #[ts(type = "string")]
    pub match_date: DateTime<Utc>,
    pub home_points: i32,
    pub away_points: i32,
    pub end_status: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchRef {
    pub match_id: i64,
}

/// Injury
///
/// Injury record. Player and club display fields are copied when the record
/// is written and are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Injury {
    pub injury_id: i64,
    pub player_id: i64,
    pub club_id: i64,
    pub player_name: String,
    pub player_image: Option<String>,
    pub club_name: Option<String>,
    pub club_image: Option<String>,
    pub injury_type: String,
    pub average_recovery_time: String,
    #[ts(type = "string")]
    pub reported_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InjuryRequest {
    pub player_id: i64,
    #[validate(length(min = 1, message = "Injury type is required"))]
    pub injury_type: String,
    pub average_recovery_time: String,
}

/// PlayerNotification
///
/// A message from a club to one of its players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlayerNotification {
    pub notification_id: i64,
    pub club_id: i64,
    pub player_id: i64,
    pub message: String,
    #[ts(type = "string")]
    pub sent_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub player_id: i64,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRef {
    pub notification_id: i64,
}

/// LeaveRequest
///
/// A player's request to leave, addressed to the player's club.
/// Pending requests have `is_success` set and `is_approved` clear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub leave_request_id: i64,
    pub player_id: i64,
    pub club_id: i64,
    pub leave_reason: String,
    #[ts(type = "string | null")]
    pub leave_from: Option<NaiveDate>,
    #[ts(type = "string | null")]
    pub leave_to: Option<NaiveDate>,
    pub is_success: bool,
    pub is_approved: bool,
    #[ts(type = "string")]
    pub requested_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestInput {
    #[validate(length(min = 1, message = "Reason is required"))]
    pub leave_reason: String,
    pub leave_from: Option<NaiveDate>,
    pub leave_to: Option<NaiveDate>,
}

/// LeaveRequestRef
///
/// Identifies one leave request; also the response of an approval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestRef {
    pub leave_request_id: i64,
}
