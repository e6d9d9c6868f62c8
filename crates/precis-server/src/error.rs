//! Error handling for the web server.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;

use precis_core::error::PrecisError;
use precis_extractors::ExtractError;

use crate::views;

/// Failure while turning an uploaded document into a summary report.
///
/// The variant records the failing stage for logs; the message shown to the
/// user is the inner error's description.
#[derive(Error, Debug)]
pub enum ProcessingError {
    /// Text could not be extracted from the upload.
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    /// A summarizer or the model failed.
    #[error(transparent)]
    Summarization(#[from] PrecisError),
}

impl ProcessingError {
    /// Stage that failed, used as a log field.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "extraction",
            Self::Summarization(_) => "summarization",
        }
    }

    /// Format of the document whose parser failed.
    pub fn format(&self) -> Option<&'static str> {
        match self {
            Self::Extraction(e) => Some(e.format()),
            Self::Summarization(_) => None,
        }
    }
}

/// API error type, rendered as an HTML error page.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    pub fn session_not_found() -> Self {
        Self::not_found("Upload not found. It may have expired; please upload the document again.")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let page = views::error_page(self.status, &self.message);
        (self.status, Html(page)).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ApiError::new(err.status(), "BAD_UPLOAD", err.body_text())
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_keeps_stage_and_inner_message() {
        let err = ProcessingError::from(ExtractError::Pdf("no xref table".to_string()));
        assert_eq!(err.stage(), "extraction");
        assert_eq!(err.format(), Some("pdf"));
        assert_eq!(err.to_string(), "PDF extraction error: no xref table");

        let err = ProcessingError::from(PrecisError::model("timed out"));
        assert_eq!(err.stage(), "summarization");
        assert_eq!(err.format(), None);
        assert_eq!(err.to_string(), "Model error: timed out");
    }

    #[test]
    fn test_api_error_status() {
        let response = ApiError::session_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::bad_request("x").to_string(),
            "[400 Bad Request] BAD_REQUEST: x"
        );
    }
}
