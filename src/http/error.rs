//! Error translation for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::contact::{MissingContent, ValidationError};
use crate::error::StoreError;

/// Error type for route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `name` or `number` absent from the request body.
    #[error("content missing")]
    ContentMissing,

    /// Body could not be parsed as a contact.
    #[error("{0}")]
    MalformedPayload(String),

    /// Path id is not in the store's identifier syntax.
    #[error("malformatted id")]
    MalformattedId,

    /// Store rejected the write.
    #[error(transparent)]
    Validation(ValidationError),

    /// No contact has that id.
    #[error("not found")]
    NotFound,

    /// Anything else; reported as a server error.
    #[error("internal error: {0}")]
    Internal(StoreError),
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ContentMissing
            | ApiError::MalformedPayload(_)
            | ApiError::MalformattedId
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidIdentifier(_) => ApiError::MalformattedId,
            StoreError::Validation(e) => ApiError::Validation(e),
            other => ApiError::Internal(other),
        }
    }
}

impl From<MissingContent> for ApiError {
    fn from(_: MissingContent) -> Self {
        ApiError::ContentMissing
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotFound => status.into_response(),
            ApiError::Internal(err) => {
                error!(error = %err, "Unhandled store failure");
                status.into_response()
            }
            other => (status, Json(json!({ "error": other.to_string() }))).into_response(),
        }
    }
}
