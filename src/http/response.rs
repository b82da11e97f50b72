//! Error responses.
//!
//! # Responsibilities
//! - Map handler failures to HTTP status codes
//! - Render a uniform JSON error body: `{"error": "..."}`
//!
//! # Design Decisions
//! - Body rejections keep axum's status (400 syntax, 415 content type, 422 schema)
//! - Client errors are logged at warn; there are no server-side error variants

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::users::UserValidationError;

/// Errors surfaced by the user handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error("invalid user: {0}")]
    InvalidUser(#[from] UserValidationError),

    #[error("invalid user id '{0}'")]
    InvalidId(String),

    #[error("user {0} not found")]
    NotFound(i64),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::InvalidUser(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Wire shape of an error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = %status, error = %self, "Request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
