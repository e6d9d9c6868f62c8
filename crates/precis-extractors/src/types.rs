//! Core types for text extraction.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Declared type of an uploaded document.
///
/// The set is closed: every extraction path matches on it exhaustively, so a
/// new format shows up as a compile error wherever it is not yet handled.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document.
    #[strum(serialize = "pdf")]
    Pdf,
    /// Plain UTF-8 text.
    #[strum(serialize = "txt")]
    PlainText,
    /// Microsoft Word document.
    #[strum(serialize = "docx")]
    Docx,
    /// Microsoft PowerPoint presentation.
    #[strum(serialize = "pptx")]
    Pptx,
}

impl DocumentKind {
    /// Human-readable label shown in the document type selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF Document (.pdf)",
            Self::PlainText => "Text File (.txt)",
            Self::Docx => "Word Document (.docx)",
            Self::Pptx => "PowerPoint Presentation (.pptx)",
        }
    }

    /// File extension accepted for this kind (without the dot).
    pub fn extension(&self) -> &'static str {
        self.into()
    }

    /// Check whether a filename carries this kind's extension.
    pub fn matches_filename(&self, filename: &str) -> bool {
        std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(self.extension()))
            .unwrap_or(false)
    }
}

/// Document structure metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Total page count (PDF).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Paragraph count (DOCX, PPTX).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_count: Option<usize>,

    /// Slide count (PPTX).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<usize>,
}

/// Extracted text with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted text.
    pub text: String,

    /// Declared kind of the source document.
    pub kind: DocumentKind,

    /// Document structure.
    #[serde(default)]
    pub structure: DocumentStructure,

    /// Size of the source document in bytes.
    pub original_size: usize,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, kind: DocumentKind, original_size: usize) -> Self {
        Self {
            text,
            kind,
            structure: DocumentStructure::default(),
            original_size,
        }
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = structure;
        self
    }

    /// Check if extraction produced any non-whitespace text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Take the extracted text.
    pub fn into_text(self) -> String {
        self.text
    }
}
