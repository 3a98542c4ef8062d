//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! and the HTTP rendering of [`AppError`] as a failure envelope.

use super::app_error::AppError;

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::internal("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => match db_err.constraint() {
                        Some(constraint) => {
                            AppError::conflict(format!("Duplicate value violates {}", constraint))
                        }
                        None => AppError::conflict("Duplicate key value"),
                    },
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some(code) if code.starts_with("53") => {
                        AppError::internal("Database resource exhausted")
                    }
                    Some(code) if code.starts_with("57") => AppError::internal("Database unavailable"),
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => AppError::internal("Database connection error").with_source(err),
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        use crate::envelope::ApiResponse;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body: ApiResponse<()> = ApiResponse::failure(self.client_message());

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_data_error_conversion() {
        let json_err = serde_json::from_str::<u32>("\"not a number\"").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_storage_outage_is_internal_error() {
        let timed_out = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(timed_out.kind(), ErrorKind::InternalServerError);
        assert_eq!(timed_out.status_code(), 500);

        let refused = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let io = AppError::from(sqlx::Error::Io(refused));
        assert_eq!(io.status_code(), 500);
        assert_eq!(io.message(), "Database connection error");

        assert_eq!(AppError::from(sqlx::Error::PoolClosed).status_code(), 500);
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_status() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let response = AppError::forbidden("Not authorized to perform this action").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = AppError::not_found("Donation not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
