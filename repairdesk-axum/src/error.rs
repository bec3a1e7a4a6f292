//! Mapping of service errors onto HTTP responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use repairdesk_query::{ErrorCode, QueryError};

use crate::response::ApiResponse;

/// Errors that can occur while serving a request.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The service refused or failed the operation.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The request could not be decoded (query string, body or path).
    #[error("malformed request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Query(err) => match err.code {
                ErrorCode::RecordNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidParameter | ErrorCode::RequiredFieldMissing => {
                    StatusCode::BAD_REQUEST
                }
                ErrorCode::UniqueConstraint | ErrorCode::ForeignKeyConstraint => {
                    StatusCode::CONFLICT
                }
                ErrorCode::InvalidConfiguration | ErrorCode::Internal => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Error code reported in the envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::InvalidParameter,
            Self::Query(err) => err.code,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(message) => message.clone(),
            Self::Query(err) => err.message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "request failed");
        } else {
            warn!(status = %status, error = %self, "request rejected");
        }
        let body = ApiResponse::<()>::failure(self.code(), self.message());
        (status, body).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
