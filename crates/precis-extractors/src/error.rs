//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during text extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Plain-text upload is not valid UTF-8.
    #[error("'utf-8' codec can't decode the uploaded file: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// PDF parsing failed.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// DOCX parsing failed.
    #[error("DOCX extraction error: {0}")]
    Docx(String),

    /// PPTX parsing failed.
    #[error("PPTX extraction error: {0}")]
    Pptx(String),

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking (includes parser panics).
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ExtractError {
    /// Short name of the failing format, used in log fields.
    pub fn format(&self) -> &'static str {
        match self {
            Self::Utf8(_) => "text",
            Self::Pdf(_) => "pdf",
            Self::Docx(_) => "docx",
            Self::Pptx(_) => "pptx",
            Self::Io(_) | Self::TaskJoin(_) => "io",
        }
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
