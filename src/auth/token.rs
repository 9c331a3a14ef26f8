use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};

use super::{Claims, Role};
use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
};

/// issue_token
///
/// Signs a session token for an account that has just proven its password.
pub fn issue_token(config: &AppConfig, id: i64, role: Role) -> AppResult<String> {
    let now = Utc::now();
    let exp = Duration::try_hours(config.jwt_ttl_hours)
        .filter(|ttl| *ttl > Duration::zero())
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| {
            AppError::Internal(format!("invalid token lifetime: {}h", config.jwt_ttl_hours))
        })?;

    let claims = Claims {
        sub: id,
        role,
        iat: now.timestamp() as usize,
        exp: exp.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("failed to sign token: {}", e)))
}

/// decode_token
///
/// Verifies signature and expiry and returns the claims.
pub fn decode_token(config: &AppConfig, token: &str) -> AppResult<Claims> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized("session token expired".to_string()),
        _ => AppError::Unauthorized("invalid session token".to_string()),
    })
}
