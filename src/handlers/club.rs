use axum::{Json, extract::State, http::StatusCode};

use super::{check_old_password, check_password, validated};
use crate::{
    AppState,
    auth::{AuthUser, Role, hash_password, issue_token},
    error::AppResult,
    models::{
        ChangePasswordRequest, ClubLoginRequest, ClubLoginResponse, ClubProfile,
        ClubRegistrationRequest, ClubUpdateProfileRequest, FootballNews, Injury, InjuryRequest,
        LeaveRequest, LeaveRequestRef, Match, MatchRef, MessageResponse, NewsRef, Player,
        PlayerNotification, PlayerRef, SearchPlayersRequest, SendNotificationRequest,
    },
};

// --- Account ---

/// club_registration
///
/// [Public Route] Creates a club account. Only `clubEmail` and `clubPassword`
/// are required.
#[utoipa::path(
    post,
    path = "/api/club/clubRegistration",
    tag = "club",
    request_body = ClubRegistrationRequest,
    responses(
        (status = 201, description = "Club registered", body = ClubProfile),
        (status = 400, description = "Invalid payload or email already in use")
    )
)]
pub async fn club_registration(
    State(state): State<AppState>,
    Json(payload): Json<ClubRegistrationRequest>,
) -> AppResult<(StatusCode, Json<ClubProfile>)> {
    let payload = validated(payload)?;
    let password_hash = hash_password(payload.club_password.clone()).await?;
    let profile = state
        .clubs
        .register_club(payload.into_new_club(password_hash))
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// club_login
///
/// [Public Route] Only active, unsuspended clubs can log in.
#[utoipa::path(
    post,
    path = "/api/club/clubLogin",
    tag = "club",
    request_body = ClubLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = ClubLoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No live club with this email")
    )
)]
pub async fn club_login(
    State(state): State<AppState>,
    Json(payload): Json<ClubLoginRequest>,
) -> AppResult<Json<ClubLoginResponse>> {
    let credentials = state
        .clubs
        .club_credentials_by_email(&payload.club_email)
        .await?;
    check_password(&credentials, payload.club_password).await?;

    let token = issue_token(&state.config, credentials.id, Role::Club)?;
    let club = state.clubs.club_profile(credentials.id).await?;
    tracing::info!(club_id = club.club_id, "club logged in");
    Ok(Json(ClubLoginResponse { token, club }))
}

#[utoipa::path(
    post,
    path = "/api/club/clubChangePassword",
    tag = "club",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Old password is incorrect"),
        (status = 409, description = "Password changed concurrently")
    )
)]
pub async fn club_change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let club_id = auth.require(Role::Club)?;
    let payload = validated(payload)?;

    let credentials = state.clubs.club_credentials(club_id).await?;
    check_old_password(&credentials, payload.old_password).await?;
    let new_hash = hash_password(payload.new_password).await?;
    state
        .clubs
        .update_club_password(club_id, &credentials.password_hash, &new_hash)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewProfile",
    tag = "club",
    responses((status = 200, description = "Own profile", body = ClubProfile))
)]
pub async fn club_view_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<ClubProfile>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.club_profile(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubUpdateProfile",
    tag = "club",
    request_body = ClubUpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ClubProfile),
        (status = 400, description = "Invalid field value")
    )
)]
pub async fn club_update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ClubUpdateProfileRequest>,
) -> AppResult<Json<ClubProfile>> {
    let club_id = auth.require(Role::Club)?;
    let payload = validated(payload)?;
    Ok(Json(state.clubs.update_club_profile(club_id, payload).await?))
}

// --- Roster ---

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllUnapprovedPlayers",
    tag = "club",
    responses((status = 200, description = "Players awaiting approval", body = [Player]))
)]
pub async fn club_view_all_unapproved_players(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Player>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.unapproved_players(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewOneUnapprovedPlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Player awaiting approval", body = Player),
        (status = 404, description = "No such unapproved player in this club")
    )
)]
pub async fn club_view_one_unapproved_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<Player>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(
        state
            .clubs
            .unapproved_player(club_id, target.player_id)
            .await?,
    ))
}

/// club_approve_one_player
///
/// [Protected Route] Approves and activates a pending player. Approving the
/// same player twice fails the second time with 404 (`ineligible`).
#[utoipa::path(
    post,
    path = "/api/club/clubApproveOnePlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Player approved", body = PlayerRef),
        (status = 404, description = "Player missing or not pending approval")
    )
)]
pub async fn club_approve_one_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<PlayerRef>> {
    let club_id = auth.require(Role::Club)?;
    let player_id = state.clubs.approve_player(club_id, target.player_id).await?;
    Ok(Json(PlayerRef { player_id }))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllPlayers",
    tag = "club",
    responses((status = 200, description = "Active roster", body = [Player]))
)]
pub async fn club_view_all_players(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Player>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.roster_players(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewOnePlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Roster player", body = Player),
        (status = 404, description = "No such active player in this club")
    )
)]
pub async fn club_view_one_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<Player>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.roster_player(club_id, target.player_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubDeleteOnePlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Player deleted", body = PlayerRef),
        (status = 404, description = "Player missing or already deleted")
    )
)]
pub async fn club_delete_one_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<PlayerRef>> {
    let club_id = auth.require(Role::Club)?;
    let player_id = state.clubs.delete_player(club_id, target.player_id).await?;
    Ok(Json(PlayerRef { player_id }))
}

#[utoipa::path(
    post,
    path = "/api/club/clubSuspendOnePlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Player suspended", body = PlayerRef),
        (status = 404, description = "Player missing or not active")
    )
)]
pub async fn club_suspend_one_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<PlayerRef>> {
    let club_id = auth.require(Role::Club)?;
    let player_id = state.clubs.suspend_player(club_id, target.player_id).await?;
    Ok(Json(PlayerRef { player_id }))
}

#[utoipa::path(
    post,
    path = "/api/club/clubUnSuspendOnePlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Player reinstated", body = PlayerRef),
        (status = 404, description = "Player missing or not suspended")
    )
)]
pub async fn club_unsuspend_one_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<PlayerRef>> {
    let club_id = auth.require(Role::Club)?;
    let player_id = state
        .clubs
        .unsuspend_player(club_id, target.player_id)
        .await?;
    Ok(Json(PlayerRef { player_id }))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllSuspendedPlayers",
    tag = "club",
    responses((status = 200, description = "Suspended players", body = [Player]))
)]
pub async fn club_view_all_suspended_players(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Player>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.suspended_players(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewOneSuspendedPlayer",
    tag = "club",
    request_body = PlayerRef,
    responses(
        (status = 200, description = "Suspended player", body = Player),
        (status = 404, description = "No such suspended player in this club")
    )
)]
pub async fn club_view_one_suspended_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<PlayerRef>,
) -> AppResult<Json<Player>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(
        state
            .clubs
            .suspended_player(club_id, target.player_id)
            .await?,
    ))
}

/// club_search_players
///
/// [Protected Route] Case-insensitive substring search over id, name, email,
/// mobile and address. No match is a 404, not an empty list.
#[utoipa::path(
    post,
    path = "/api/club/clubSearchPlayers",
    tag = "club",
    request_body = SearchPlayersRequest,
    responses(
        (status = 200, description = "Matching players", body = [Player]),
        (status = 404, description = "No players found")
    )
)]
pub async fn club_search_players(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SearchPlayersRequest>,
) -> AppResult<Json<Vec<Player>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(
        state
            .clubs
            .search_players(club_id, &payload.search_query)
            .await?,
    ))
}

// --- Player communication ---

#[utoipa::path(
    post,
    path = "/api/club/clubSendNotificationToPlayer",
    tag = "club",
    request_body = SendNotificationRequest,
    responses(
        (status = 201, description = "Notification sent", body = PlayerNotification),
        (status = 404, description = "Player missing, inactive or in another club")
    )
)]
pub async fn club_send_notification_to_player(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SendNotificationRequest>,
) -> AppResult<(StatusCode, Json<PlayerNotification>)> {
    let club_id = auth.require(Role::Club)?;
    let payload = validated(payload)?;
    let sent = state.clubs.send_notification(club_id, payload).await?;
    Ok((StatusCode::CREATED, Json(sent)))
}

/// club_add_one_injury_update
///
/// [Protected Route] Records an injury for one of the club's players. Player
/// and club display fields are copied into the record as they are now.
#[utoipa::path(
    post,
    path = "/api/club/clubAddOneInjuryUpdate",
    tag = "club",
    request_body = InjuryRequest,
    responses((status = 201, description = "Injury recorded", body = Injury))
)]
pub async fn club_add_one_injury_update(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<InjuryRequest>,
) -> AppResult<(StatusCode, Json<Injury>)> {
    let club_id = auth.require(Role::Club)?;
    let payload = validated(payload)?;
    let injury = state.clubs.add_injury(club_id, payload).await?;
    Ok((StatusCode::CREATED, Json(injury)))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllLeaveRequests",
    tag = "club",
    responses((status = 200, description = "Pending leave requests", body = [LeaveRequest]))
)]
pub async fn club_view_all_leave_requests(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LeaveRequest>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.pending_leave_requests(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewOneLeaveRequest",
    tag = "club",
    request_body = LeaveRequestRef,
    responses((status = 200, description = "Pending leave request", body = LeaveRequest))
)]
pub async fn club_view_one_leave_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<LeaveRequestRef>,
) -> AppResult<Json<LeaveRequest>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(
        state
            .clubs
            .pending_leave_request(club_id, target.leave_request_id)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/club/clubApproveOneLeaveRequest",
    tag = "club",
    request_body = LeaveRequestRef,
    responses(
        (status = 200, description = "Leave request approved", body = LeaveRequestRef),
        (status = 404, description = "Request missing or already approved")
    )
)]
pub async fn club_approve_one_leave_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<LeaveRequestRef>,
) -> AppResult<Json<LeaveRequestRef>> {
    let club_id = auth.require(Role::Club)?;
    let leave_request_id = state
        .clubs
        .approve_leave_request(club_id, target.leave_request_id)
        .await?;
    Ok(Json(LeaveRequestRef { leave_request_id }))
}

// --- Browse ---

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllMatches",
    tag = "club",
    responses((status = 200, description = "Upcoming matches, latest first", body = [Match]))
)]
pub async fn club_view_all_matches(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Match>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.club_matches(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewOneMatch",
    tag = "club",
    request_body = MatchRef,
    responses((status = 200, description = "Match", body = Match))
)]
pub async fn club_view_one_match(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<MatchRef>,
) -> AppResult<Json<Match>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.club_match(club_id, target.match_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllMatchPoints",
    tag = "club",
    responses((status = 200, description = "Points table, oldest first", body = [Match]))
)]
pub async fn club_view_all_match_points(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Match>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.club_match_points(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllNews",
    tag = "club",
    responses((status = 200, description = "News, newest first", body = [FootballNews]))
)]
pub async fn club_view_all_news(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FootballNews>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.club_news(club_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewOneNews",
    tag = "club",
    request_body = NewsRef,
    responses((status = 200, description = "News item", body = FootballNews))
)]
pub async fn club_view_one_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(target): Json<NewsRef>,
) -> AppResult<Json<FootballNews>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(
        state
            .clubs
            .club_news_item(club_id, target.football_news_id)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/club/clubViewAllClubs",
    tag = "club",
    responses((status = 200, description = "Active clubs", body = [ClubProfile]))
)]
pub async fn club_view_all_clubs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClubProfile>>> {
    let club_id = auth.require(Role::Club)?;
    Ok(Json(state.clubs.club_listing(club_id).await?))
}
