//! HTTP handlers, one module per API slice.
//!
//! Handlers stay thin: they resolve the caller from the session token, validate
//! the body, and hand off to the slice repository. The caller's own id is
//! never read from the body.

use validator::Validate;

use crate::{
    auth::verify_password,
    error::{AppError, AppResult},
    models::Credentials,
};

pub mod admin;
pub mod club;
pub mod player;

/// Runs the payload's `validator` rules, turning failures into a 400.
pub(crate) fn validated<T: Validate>(payload: T) -> AppResult<T> {
    payload.validate()?;
    Ok(payload)
}

/// Checks a login attempt against stored credentials.
///
/// A wrong password is reported as 401 without saying which part was wrong.
pub(crate) async fn check_password(credentials: &Credentials, password: String) -> AppResult<()> {
    if verify_password(password, credentials.password_hash.clone()).await? {
        Ok(())
    } else {
        tracing::warn!(account_id = credentials.id, "password mismatch");
        Err(AppError::Unauthorized("invalid email or password".to_string()))
    }
}

/// Checks the current password before a password change.
pub(crate) async fn check_old_password(credentials: &Credentials, password: String) -> AppResult<()> {
    if verify_password(password, credentials.password_hash.clone()).await? {
        Ok(())
    } else {
        Err(AppError::Unauthorized("old password is incorrect".to_string()))
    }
}

/// health
///
/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "ok"
}
