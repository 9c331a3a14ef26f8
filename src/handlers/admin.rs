use axum::{Json, extract::State, http::StatusCode};

use super::{check_old_password, check_password, validated};
use crate::{
    AppState,
    auth::{AuthUser, Role, hash_password, issue_token},
    error::AppResult,
    models::{
        AddNewsRequest, AdminLoginRequest, AdminLoginResponse, AdminProfile,
        AdminRegistrationRequest, AdminUpdateProfileRequest, ChangePasswordRequest, FootballNews,
        MessageResponse,
    },
};

/// admin_registration
///
/// [Public Route] Creates an admin account. The password is stored as a bcrypt hash.
#[utoipa::path(
    post,
    path = "/api/admin/adminRegistration",
    tag = "admin",
    request_body = AdminRegistrationRequest,
    responses(
        (status = 201, description = "Admin registered", body = AdminProfile),
        (status = 400, description = "Invalid payload or email already in use")
    )
)]
pub async fn admin_registration(
    State(state): State<AppState>,
    Json(payload): Json<AdminRegistrationRequest>,
) -> AppResult<(StatusCode, Json<AdminProfile>)> {
    let payload = validated(payload)?;
    let password_hash = hash_password(payload.admin_password.clone()).await?;
    let profile = state
        .admins
        .register_admin(payload.into_new_admin(password_hash))
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// admin_login
///
/// [Public Route] Exchanges email and password for a session token.
#[utoipa::path(
    post,
    path = "/api/admin/adminLogin",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AdminLoginResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No live admin with this email")
    )
)]
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    let credentials = state
        .admins
        .admin_credentials_by_email(&payload.admin_email)
        .await?;
    check_password(&credentials, payload.admin_password).await?;

    let token = issue_token(&state.config, credentials.id, Role::Admin)?;
    let admin = state.admins.admin_profile(credentials.id).await?;
    tracing::info!(admin_id = admin.admin_id, "admin logged in");
    Ok(Json(AdminLoginResponse { token, admin }))
}

#[utoipa::path(
    post,
    path = "/api/admin/adminChangePassword",
    tag = "admin",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Old password is incorrect"),
        (status = 409, description = "Password changed concurrently")
    )
)]
pub async fn admin_change_password(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let admin_id = auth.require(Role::Admin)?;
    let payload = validated(payload)?;

    let credentials = state.admins.admin_credentials(admin_id).await?;
    check_old_password(&credentials, payload.old_password).await?;
    let new_hash = hash_password(payload.new_password).await?;
    state
        .admins
        .update_admin_password(admin_id, &credentials.password_hash, &new_hash)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

#[utoipa::path(
    post,
    path = "/api/admin/adminViewProfile",
    tag = "admin",
    responses((status = 200, description = "Own profile", body = AdminProfile))
)]
pub async fn admin_view_profile(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<AdminProfile>> {
    let admin_id = auth.require(Role::Admin)?;
    Ok(Json(state.admins.admin_profile(admin_id).await?))
}

/// admin_update_profile
///
/// [Protected Route] Partial update of name, aadhar, mobile and address.
#[utoipa::path(
    post,
    path = "/api/admin/adminUpdateProfile",
    tag = "admin",
    request_body = AdminUpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = AdminProfile),
        (status = 400, description = "Invalid field value"),
        (status = 409, description = "Aadhar already used by another admin")
    )
)]
pub async fn admin_update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AdminUpdateProfileRequest>,
) -> AppResult<Json<AdminProfile>> {
    let admin_id = auth.require(Role::Admin)?;
    let payload = validated(payload)?;
    Ok(Json(state.admins.update_admin_profile(admin_id, payload).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/adminAddNews",
    tag = "admin",
    request_body = AddNewsRequest,
    responses((status = 201, description = "News published", body = FootballNews))
)]
pub async fn admin_add_news(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AddNewsRequest>,
) -> AppResult<(StatusCode, Json<FootballNews>)> {
    let admin_id = auth.require(Role::Admin)?;
    let payload = validated(payload)?;
    let news = state.admins.add_news(admin_id, payload).await?;
    Ok((StatusCode::CREATED, Json(news)))
}
