//! HTTP error type.
//!
//! Every failure leaves the API as a JSON body `{code, message}`. Domain
//! errors keep their [`BookingError::code`]:
//!
//! ```text
//! NO_SEATS            409    UNAUTHORIZED        403
//! NOT_FOUND           404    VALIDATION          422
//! EMAIL_TAKEN         409    DUPLICATE_REQUEST   409
//! INVALID_CREDENTIALS 401    TIMEOUT             408
//! STORAGE             500    UNAUTHENTICATED     401 (no usable session)
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventease_core::BookingError;
use serde::Serialize;
use std::fmt;

/// Application error type for handlers.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 401 for a missing, malformed or expired session.
    #[must_use]
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", message)
    }

    /// 422 for request input rejected by the API layer.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION", message)
    }

    /// 500.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", message)
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code of the response
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let status = match &err {
            BookingError::NoSeats { .. }
            | BookingError::EmailTaken { .. }
            | BookingError::DuplicateRequest { .. } => StatusCode::CONFLICT,
            BookingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BookingError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            BookingError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            BookingError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BookingError::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.code(), err.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = %self.message, "Internal server error");
        } else {
            tracing::debug!(status = %self.status, code = self.code, message = %self.message, "Request rejected");
        }

        let body = ErrorResponse {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
