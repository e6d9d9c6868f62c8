//! Error types for precis operations.

use thiserror::Error;

/// Result type alias for precis operations.
pub type PrecisResult<T> = Result<T, PrecisError>;

/// Main error type for summarization and configuration.
#[derive(Error, Debug)]
pub enum PrecisError {
    /// Summarization model failed to load or to generate.
    #[error("Model error: {message}")]
    Model {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Model endpoint rejected the credentials.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Model endpoint is rate limiting or still loading.
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error, such as a summarizer task that panicked.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PrecisError {
    /// Create a model error.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            source: None,
        }
    }

    /// Create a model error wrapping its cause.
    pub fn model_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Model {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Convert an unsuccessful HTTP response from a model endpoint.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::Authentication(body.to_string()),
            429 | 503 => Self::Unavailable(body.to_string()),
            _ => Self::model(format!("HTTP {}: {}", status, body)),
        }
    }

    /// Whether the error came from the summarization model.
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            Self::Model { .. } | Self::Authentication(_) | Self::Unavailable(_)
        )
    }
}
