//! Donation Error Types
//!
//! Donation-specific variants that render through `kernel::error::AppError`.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type DonationResult<T> = Result<T, DonationError>;

#[derive(Debug, Error)]
pub enum DonationError {
    #[error("{0}")]
    Validation(String),

    #[error("Donation not found")]
    NotFound,

    /// Transaction id or receipt number already recorded
    #[error("{0}")]
    Conflict(String),

    #[error("Receipt delivery failed: {0}")]
    Notification(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DonationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DonationError::Validation(_) => ErrorKind::BadRequest,
            DonationError::NotFound => ErrorKind::NotFound,
            DonationError::Conflict(_) => ErrorKind::Conflict,
            DonationError::Notification(_)
            | DonationError::Database(_)
            | DonationError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub(crate) fn log(&self) {
        match self {
            DonationError::Database(e) => {
                tracing::error!(error = %e, "Donation database error");
            }
            DonationError::Internal(msg) => {
                tracing::error!(message = %msg, "Donation internal error");
            }
            DonationError::Notification(msg) => {
                tracing::warn!(message = %msg, "Receipt delivery failed");
            }
            _ => {
                tracing::debug!(error = %self, "Donation request rejected");
            }
        }
    }
}

impl From<DonationError> for AppError {
    fn from(err: DonationError) -> Self {
        match err {
            DonationError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<AppError> for DonationError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => DonationError::Validation(err.message().to_string()),
            ErrorKind::NotFound => DonationError::NotFound,
            ErrorKind::Conflict => DonationError::Conflict(err.message().to_string()),
            _ => DonationError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for DonationError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DonationError::Validation("bad".into()), 400),
            (DonationError::NotFound, 404),
            (DonationError::Conflict("dup".into()), 409),
            (DonationError::Internal("boom".into()), 500),
            (DonationError::Notification("relay down".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_validation_message_kept_verbatim() {
        let err: DonationError = AppError::bad_request("Amount must be greater than 0").into();
        assert_eq!(err.to_string(), "Amount must be greater than 0");
    }

    #[test]
    fn test_database_outage_is_internal_error() {
        let app: AppError = DonationError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(app.status_code(), 500);

        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let response = DonationError::Database(sqlx::Error::Io(refused)).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
