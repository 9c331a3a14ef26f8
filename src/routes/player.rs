use crate::{AppState, handlers::player};
use axum::{Router, routing::post};

/// Registration and login. A newly registered player cannot log in until the
/// chosen club approves the account.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/playerRegistration", post(player::player_registration))
        .route("/playerLogin", post(player::player_login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/playerViewAllClubs", post(player::player_view_all_clubs))
        .route("/playerChangePassword", post(player::player_change_password))
        .route("/playerViewProfile", post(player::player_view_profile))
        .route("/playerUpdateProfile", post(player::player_update_profile))
        .route(
            "/playerViewAllNotifications",
            post(player::player_view_all_notifications),
        )
        .route(
            "/playerViewOneNotification",
            post(player::player_view_one_notification),
        )
        .route(
            "/playerSendLeaveRequestToClub",
            post(player::player_send_leave_request_to_club),
        )
        .route(
            "/playerViewAllApprovedLeaveRequests",
            post(player::player_view_all_approved_leave_requests),
        )
        .route("/playerViewAllMatches", post(player::player_view_all_matches))
        .route("/playerViewOneMatch", post(player::player_view_one_match))
        .route(
            "/playerViewAllMatchPoints",
            post(player::player_view_all_match_points),
        )
        .route("/playerViewAllNews", post(player::player_view_all_news))
        .route("/playerViewOneNews", post(player::player_view_one_news))
}
