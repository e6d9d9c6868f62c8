//! DOCX text extraction using docx-rs.
//!
//! Emits the text of each top-level body paragraph, in document order,
//! joined with newlines. Empty paragraphs are kept as empty lines; tables,
//! headers and footers are not part of the output.

use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentKind, DocumentStructure, ExtractedContent};
use crate::Extractor;

/// DOCX extractor using the docx-rs library.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create new DOCX extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract paragraph texts synchronously (called within spawn_blocking).
    fn extract_sync(content: Vec<u8>) -> ExtractResult<Vec<String>> {
        let docx = docx_rs::read_docx(&content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let paragraphs = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(Self::paragraph_text(p)),
                _ => None,
            })
            .collect();

        Ok(paragraphs)
    }

    /// Text of one paragraph: runs and hyperlink runs, tabs and breaks kept.
    fn paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => Self::push_run(&mut text, r),
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            Self::push_run(&mut text, r);
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    fn push_run(text: &mut String, run: &docx_rs::Run) {
        for run_child in &run.children {
            match run_child {
                RunChild::Text(t) => text.push_str(&t.text),
                RunChild::Tab(_) => text.push('\t'),
                RunChild::Break(_) => text.push('\n'),
                _ => {}
            }
        }
    }
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let paragraphs = tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;

        let structure = DocumentStructure {
            paragraph_count: Some(paragraphs.len()),
            ..Default::default()
        };

        Ok(
            ExtractedContent::new(paragraphs.join("\n"), DocumentKind::Docx, content_len)
                .with_structure(structure),
        )
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Docx
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn pack(docx: Docx) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_paragraphs_joined_with_newlines() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("First paragraph.")))
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text("Second "))
                        .add_run(Run::new().add_text("paragraph.")),
                ),
        );

        let content = DocxExtractor::new().extract(&bytes).await.unwrap();
        assert_eq!(content.text, "First paragraph.\nSecond paragraph.");
        assert_eq!(content.structure.paragraph_count, Some(2));
    }

    #[tokio::test]
    async fn test_empty_document_yields_empty_text() {
        let content = DocxExtractor::new().extract(&pack(Docx::new())).await.unwrap();
        assert_eq!(content.text, "");
    }

    #[tokio::test]
    async fn test_docx_extractor_garbage_content() {
        let result = DocxExtractor::new().extract(b"not a zip archive").await;
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }

    #[test]
    fn test_docx_extractor_kind() {
        let extractor = DocxExtractor::new();
        assert_eq!(extractor.kind(), DocumentKind::Docx);
        assert_eq!(extractor.name(), "docx-rs");
    }
}
