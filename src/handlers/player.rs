use axum::{Json, extract::State, http::StatusCode};

use super::{check_old_password, check_password, validated};
use crate::{
    AppState,
    auth::{AuthUser, Role, hash_password, issue_token},
    error::AppResult,
    models::{
        ChangePasswordRequest, ClubProfile, FootballNews, LeaveRequest, LeaveRequestInput, Match,
        MatchRef, MessageResponse, NewsRef, NotificationRef, Player, PlayerLoginRequest,
        PlayerLoginResponse, PlayerNotification, PlayerRegistrationRequest,
        PlayerUpdateProfileRequest,
    },
};

/// player_registration
///
/// [Public Route] Signs a player up with a club. The account stays unapproved
/// and inactive, and cannot log in, until the club approves it.
#[utoipa::path(
    post,
    path = "/api/player/playerRegistration",
    tag = "player",
    request_body = PlayerRegistrationRequest,
    responses(
        (status = 201, description = "Player registered, awaiting approval", body = Player),
        (status = 400, description = "Invalid payload or email already in use"),
        (status = 404, description = "Club missing or not accepting players")
    )
)]
pub async fn player_registration(
    State(state): State<AppState>,
    Json(payload): Json<PlayerRegistrationRequest>,
) -> AppResult<(StatusCode, Json<Player>)> {
    let payload = validated(payload)?;
    let password_hash = hash_password(payload.player_password.clone()).await?;
    let player = state
        .players
        .register_player(payload.into_new_player(password_hash))
        .await?;
    Ok((StatusCode::CREATED, Json(player)))
}

#[utoipa::path(
    post,
    path = "/api/player/playerLogin",
    tag = "player",
    request_body = PlayerLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = PlayerLoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No live player with this email")
    )
)]
pub async fn player_login(
    State(state): State<AppState>,
    Json(payload): Json<PlayerLoginRequest>,
) -> AppResult<Json<PlayerLoginResponse>> {
    let credentials = state
        .players
        .player_credentials_by_email(&payload.player_email)
        .await?;
    check_password(&credentials, payload.player_password).await?;

    let token = issue_token(&state.config, credentials.id, Role::Player)?;
    let player = state.players.player_profile(credentials.id).await?;
    tracing::info!(player_id = player.player_id, "player logged in");
    Ok(Json(PlayerLoginResponse { token, player }))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewAllClubs",
    tag = "player",
    responses((status = 200, description = "Active clubs", body = [ClubProfile]))
)]
pub async fn player_view_all_clubs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClubProfile>>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.player_clubs(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerChangePassword",
    tag = "player",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Old password is incorrect"),
        (status = 409, description = "Password changed concurrently")
    )
)]
pub async fn player_change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let player_id = auth.require(Role::Player)?;
    let payload = validated(payload)?;

    let credentials = state.players.player_credentials(player_id).await?;
    check_old_password(&credentials, payload.old_password).await?;
    let new_hash = hash_password(payload.new_password).await?;
    state
        .players
        .update_player_password(player_id, &credentials.password_hash, &new_hash)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewProfile",
    tag = "player",
    responses((status = 200, description = "Own profile", body = Player))
)]
pub async fn player_view_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Player>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.player_profile(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerUpdateProfile",
    tag = "player",
    request_body = PlayerUpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = Player),
        (status = 400, description = "Invalid field value")
    )
)]
pub async fn player_update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<PlayerUpdateProfileRequest>,
) -> AppResult<Json<Player>> {
    let player_id = auth.require(Role::Player)?;
    let payload = validated(payload)?;
    Ok(Json(
        state
            .players
            .update_player_profile(player_id, payload)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewAllNotifications",
    tag = "player",
    responses((status = 200, description = "Own notifications, newest first", body = [PlayerNotification]))
)]
pub async fn player_view_all_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PlayerNotification>>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.player_notifications(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewOneNotification",
    tag = "player",
    request_body = NotificationRef,
    responses(
        (status = 200, description = "Notification", body = PlayerNotification),
        (status = 404, description = "No such notification for this player")
    )
)]
pub async fn player_view_one_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<NotificationRef>,
) -> AppResult<Json<PlayerNotification>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(
        state
            .players
            .player_notification(player_id, target.notification_id)
            .await?,
    ))
}

/// player_send_leave_request_to_club
///
/// [Protected Route] Files a pending leave request with the player's own club.
#[utoipa::path(
    post,
    path = "/api/player/playerSendLeaveRequestToClub",
    tag = "player",
    request_body = LeaveRequestInput,
    responses((status = 201, description = "Leave request filed", body = LeaveRequest))
)]
pub async fn player_send_leave_request_to_club(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<LeaveRequestInput>,
) -> AppResult<(StatusCode, Json<LeaveRequest>)> {
    let player_id = auth.require(Role::Player)?;
    let payload = validated(payload)?;
    let request = state.players.send_leave_request(player_id, payload).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewAllApprovedLeaveRequests",
    tag = "player",
    responses((status = 200, description = "Approved leave requests", body = [LeaveRequest]))
)]
pub async fn player_view_all_approved_leave_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LeaveRequest>>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.approved_leave_requests(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewAllMatches",
    tag = "player",
    responses((status = 200, description = "Upcoming matches, latest first", body = [Match]))
)]
pub async fn player_view_all_matches(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Match>>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.player_matches(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewOneMatch",
    tag = "player",
    request_body = MatchRef,
    responses((status = 200, description = "Match", body = Match))
)]
pub async fn player_view_one_match(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<MatchRef>,
) -> AppResult<Json<Match>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(
        state
            .players
            .player_match(player_id, target.match_id)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewAllMatchPoints",
    tag = "player",
    responses((status = 200, description = "Points table, oldest first", body = [Match]))
)]
pub async fn player_view_all_match_points(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Match>>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.player_match_points(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewAllNews",
    tag = "player",
    responses((status = 200, description = "News, newest first", body = [FootballNews]))
)]
pub async fn player_view_all_news(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FootballNews>>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(state.players.player_news(player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/player/playerViewOneNews",
    tag = "player",
    request_body = NewsRef,
    responses((status = 200, description = "News item", body = FootballNews))
)]
pub async fn player_view_one_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<NewsRef>,
) -> AppResult<Json<FootballNews>> {
    let player_id = auth.require(Role::Player)?;
    Ok(Json(
        state
            .players
            .player_news_item(player_id, target.football_news_id)
            .await?,
    ))
}
