//! Factory for creating extractors.

use std::sync::Arc;

use crate::types::DocumentKind;
use crate::{DocxExtractor, Extractor, PdfExtractor, PlainTextExtractor, PptxExtractor};

/// Factory for creating document extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a plain-text extractor.
    pub fn plain_text() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::new())
    }

    /// Create a PDF extractor.
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a DOCX extractor.
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create a PPTX extractor.
    pub fn pptx() -> Arc<dyn Extractor> {
        Arc::new(PptxExtractor::new())
    }

    /// Create the default extractor for a document kind.
    pub fn for_kind(kind: DocumentKind) -> Arc<dyn Extractor> {
        match kind {
            DocumentKind::PlainText => Self::plain_text(),
            DocumentKind::Pdf => Self::pdf(),
            DocumentKind::Docx => Self::docx(),
            DocumentKind::Pptx => Self::pptx(),
        }
    }
}
