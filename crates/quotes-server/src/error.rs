//! HTTP error type
//!
//! Every JSON error body has the shape `{"status": <code>, "error": <message>}`.
//! The duplicate-author-name rejection is answered in plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quotes_core::{ErrorBody, StoreError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Author with id={0} not found")]
    AuthorNotFound(i64),

    #[error("Quote with id={0} not found")]
    QuoteNotFound(i64),

    #[error("The requested URL was not found on the server. If you entered the URL manually please check your spelling and try again.")]
    RouteNotFound,

    #[error("Author name must be unique")]
    DuplicateAuthorName,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::AuthorNotFound(_) | ApiError::QuoteNotFound(_) | ApiError::RouteNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::DuplicateAuthorName | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::DuplicateAuthorName => (status, self.to_string()).into_response(),
            ApiError::Store(_) | ApiError::Internal(_) => {
                tracing::error!("Request failed: {}", self);
                let body = Json(ErrorBody::new(status.as_u16(), "Internal server error"));
                (status, body).into_response()
            }
            _ => {
                let body = Json(ErrorBody::new(status.as_u16(), self.to_string()));
                (status, body).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::AuthorNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::QuoteNotFound(1).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::DuplicateAuthorName.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ValidationError::BlankField("name")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::Database("disk I/O error".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            ApiError::AuthorNotFound(7).to_string(),
            "Author with id=7 not found"
        );
        assert_eq!(
            ApiError::QuoteNotFound(3).to_string(),
            "Quote with id=3 not found"
        );
    }
}
