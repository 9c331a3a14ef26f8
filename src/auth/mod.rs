use std::fmt;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use serde::{Deserialize, Serialize};

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
};

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{decode_token, issue_token};

/// Role
///
/// The three kinds of account. Each API slice only accepts its own role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Club,
    Player,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::Club => "club",
            Role::Player => "player",
        };
        f.write_str(name)
    }
}

/// Claims
///
/// Payload of the session token issued at login.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the account id within its role's table.
    pub sub: i64,
    pub role: Role,
    /// Expiration Time (exp), seconds since the epoch.
    pub exp: usize,
    /// Issued At (iat), seconds since the epoch.
    pub iat: usize,
}

/// AuthUser
///
/// The verified identity behind a request. Handlers take the caller's id from
/// here rather than from the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub role: Role,
}

impl AuthUser {
    /// Returns the account id if the token belongs to `role`, 403 otherwise.
    pub fn require(&self, role: Role) -> AppResult<i64> {
        if self.role == role {
            Ok(self.id)
        } else {
            Err(AppError::Forbidden(format!(
                "{} session cannot access {} endpoints",
                self.role, role
            )))
        }
    }
}

/// AuthUser Extractor Implementation
///
/// Reads `Authorization: Bearer <token>` and verifies it with the configured
/// secret. Account status is not checked here: every repository operation
/// re-validates the caller's flags in the same statement that acts.
///
/// Rejection: 401 on a missing, malformed, forged or expired token.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?;

        let claims = decode_token(&config, token)?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}
