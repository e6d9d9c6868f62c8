//! PDF text extraction using pdf-extract.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentKind, DocumentStructure, ExtractedContent};
use crate::Extractor;

/// PDF extractor using the pdf-extract library.
///
/// Pages are extracted individually and concatenated without a separator;
/// a page with no text layer contributes nothing. The synchronous parser runs
/// in `spawn_blocking`, so a panic inside pdf-extract on a malformed file is
/// reported as [`ExtractError::TaskJoin`] rather than taking down the worker.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract per-page text synchronously (called within spawn_blocking).
    fn extract_sync(content: Vec<u8>) -> ExtractResult<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(&content)
            .map_err(|e| ExtractError::Pdf(format!("Failed to parse PDF: {}", e)))
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let pages = tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;
        let page_count = pages.len();
        let text: String = pages.concat();

        debug!(page_count, chars = text.len(), "Extracted PDF text");

        Ok(
            ExtractedContent::new(text, DocumentKind::Pdf, content_len).with_structure(
                DocumentStructure {
                    page_count: Some(page_count),
                    ..Default::default()
                },
            ),
        )
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Pdf
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a one-page PDF with an empty content stream.
    fn blank_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => dictionary! {},
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_blank_pdf_yields_empty_text() {
        let content = PdfExtractor::new().extract(&blank_pdf()).await.unwrap();
        assert!(content.text.trim().is_empty());
        assert_eq!(content.structure.page_count, Some(1));
    }

    #[tokio::test]
    async fn test_text_bytes_are_not_a_pdf() {
        let result = PdfExtractor::new()
            .extract(b"Just a plain text file renamed to .pdf.")
            .await;
        assert!(matches!(
            result,
            Err(ExtractError::Pdf(_)) | Err(ExtractError::TaskJoin(_))
        ));
    }

    #[test]
    fn test_pdf_extractor_kind() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.kind(), DocumentKind::Pdf);
        assert_eq!(extractor.name(), "pdf-extract");
    }
}
