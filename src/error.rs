use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// NotFoundReason
///
/// Separates "there is no such row" from "the row exists but its current flags
/// rule the operation out" (already approved, suspended club, ...). Both are
/// reported as 404; the reason travels in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotFoundReason {
    Missing,
    Ineligible,
}

impl NotFoundReason {
    fn phrase(&self) -> &'static str {
        match self {
            NotFoundReason::Missing => "not found",
            NotFoundReason::Ineligible => "not found or not eligible for this action",
        }
    }
}

/// AppError
///
/// The single failure type returned by repositories and handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(HashMap<String, Vec<String>>),

    #[error("{entity} {}", .reason.phrase())]
    NotFound {
        entity: &'static str,
        reason: NotFoundReason,
    },

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn missing(entity: &'static str) -> Self {
        AppError::NotFound {
            entity,
            reason: NotFoundReason::Missing,
        }
    }

    pub fn ineligible(entity: &'static str) -> Self {
        AppError::NotFound {
            entity,
            reason: NotFoundReason::Ineligible,
        }
    }

    /// Single-field validation failure, e.g. a duplicate email.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        AppError::Validation(errors)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::NotFound { .. } => "NotFound",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::Conflict(_) => "Conflict",
            AppError::Database(_) | AppError::Internal(_) => "InternalError",
        }
    }
}

/// Whether a database error is a violation of the named unique index.
pub(crate) fn is_unique_violation(error: &sqlx::Error, index: &str) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation() && db.constraint() == Some(index),
        _ => false,
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("invalid {}", e.code))
                    })
                    .collect();
                (camel_case(field), messages)
            })
            .collect();
        AppError::Validation(fields)
    }
}

// Validation keys follow the camelCase JSON field names.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// ErrorBody
///
/// JSON shape of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<NotFoundReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        // Internal details stay in the logs.
        let message = match &self {
            AppError::Database(_) | AppError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: self.kind(),
            message,
            reason: match &self {
                AppError::NotFound { reason, .. } => Some(*reason),
                _ => None,
            },
            errors: match self {
                AppError::Validation(errors) => Some(errors),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}
