//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header
    #[error("Not authorized to access this route")]
    MissingToken,

    /// Bad signature, malformed payload or expired
    #[error("Not authorized to access this route")]
    InvalidToken,

    /// Token is valid but its admin was removed
    #[error("Admin no longer exists")]
    AdminNotFound,

    #[error("Admin account is deactivated")]
    AccountDeactivated,

    /// Unknown email, wrong password or inactive account at login
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authorized to perform this action")]
    InsufficientPermission,

    #[error("Admin with this username or email already exists")]
    AdminExists,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::AdminNotFound
            | AuthError::AccountDeactivated
            | AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::InsufficientPermission => ErrorKind::Forbidden,
            AuthError::AdminExists => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InsufficientPermission => {
                tracing::warn!("Permission denied");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            ErrorKind::Conflict => AuthError::AdminExists,
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
