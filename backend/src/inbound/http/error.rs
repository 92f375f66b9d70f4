//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting actix handlers
//! turn domain failures into statuses. Persistence failures are translated
//! exactly once, here at the handler boundary; nothing below retries or
//! re-maps them.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        // Absent rows answer with a bare 404; other failures carry the
        // JSON envelope. Internal messages never leave the process.
        match self.code() {
            ErrorCode::NotFound => HttpResponse::build(self.status_code()).finish(),
            ErrorCode::InternalError => {
                error!(message = self.message(), "request failed internally");
                HttpResponse::build(self.status_code()).json(redact_if_internal(self))
            }
            _ => HttpResponse::build(self.status_code()).json(self.clone()),
        }
    }
}
