use crate::{AppState, handlers::club};
use axum::{Router, routing::post};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/clubRegistration", post(club::club_registration))
        .route("/clubLogin", post(club::club_login))
}

/// Club Router Module
///
/// Routes for a logged-in club. Every handler requires a club token and works
/// only on the calling club's own players and leave requests.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        // --- Account ---
        .route("/clubChangePassword", post(club::club_change_password))
        .route("/clubViewProfile", post(club::club_view_profile))
        .route("/clubUpdateProfile", post(club::club_update_profile))
        // --- Roster ---
        // Pending registrations: view, then approve (unapproved -> approved + active).
        .route(
            "/clubViewAllUnapprovedPlayers",
            post(club::club_view_all_unapproved_players),
        )
        .route(
            "/clubViewOneUnapprovedPlayer",
            post(club::club_view_one_unapproved_player),
        )
        .route("/clubApproveOnePlayer", post(club::club_approve_one_player))
        .route("/clubViewAllPlayers", post(club::club_view_all_players))
        .route("/clubViewOnePlayer", post(club::club_view_one_player))
        .route("/clubDeleteOnePlayer", post(club::club_delete_one_player))
        // Suspension toggles is_suspended and is_active together.
        .route("/clubSuspendOnePlayer", post(club::club_suspend_one_player))
        .route(
            "/clubUnSuspendOnePlayer",
            post(club::club_unsuspend_one_player),
        )
        .route(
            "/clubViewAllSuspendedPlayers",
            post(club::club_view_all_suspended_players),
        )
        .route(
            "/clubViewOneSuspendedPlayer",
            post(club::club_view_one_suspended_player),
        )
        .route("/clubSearchPlayers", post(club::club_search_players))
        // --- Player communication ---
        .route(
            "/clubSendNotificationToPlayer",
            post(club::club_send_notification_to_player),
        )
        .route(
            "/clubAddOneInjuryUpdate",
            post(club::club_add_one_injury_update),
        )
        .route(
            "/clubViewAllLeaveRequests",
            post(club::club_view_all_leave_requests),
        )
        .route(
            "/clubViewOneLeaveRequest",
            post(club::club_view_one_leave_request),
        )
        .route(
            "/clubApproveOneLeaveRequest",
            post(club::club_approve_one_leave_request),
        )
        // --- Browse ---
        .route("/clubViewAllMatches", post(club::club_view_all_matches))
        .route("/clubViewOneMatch", post(club::club_view_one_match))
        .route(
            "/clubViewAllMatchPoints",
            post(club::club_view_all_match_points),
        )
        .route("/clubViewAllNews", post(club::club_view_all_news))
        .route("/clubViewOneNews", post(club::club_view_one_news))
        .route("/clubViewAllClubs", post(club::club_view_all_clubs))
}
