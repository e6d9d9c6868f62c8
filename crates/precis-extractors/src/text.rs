//! Plain-text extraction.

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::{DocumentKind, ExtractedContent};
use crate::Extractor;

/// Decodes plain-text uploads as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for PlainTextExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = String::from_utf8(content.to_vec())?;
        Ok(ExtractedContent::new(
            text,
            DocumentKind::PlainText,
            content.len(),
        ))
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::PlainText
    }

    fn name(&self) -> &str {
        "utf-8"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractError;

    #[tokio::test]
    async fn test_decodes_utf8() {
        let content = PlainTextExtractor::new()
            .extract("Grüße aus Köln.".as_bytes())
            .await
            .unwrap();
        assert_eq!(content.text, "Grüße aus Köln.");
        assert_eq!(content.kind, DocumentKind::PlainText);
    }

    #[tokio::test]
    async fn test_empty_input_is_empty_text() {
        let content = PlainTextExtractor::new().extract(b"").await.unwrap();
        assert_eq!(content.text, "");
    }

    #[tokio::test]
    async fn test_invalid_utf8_fails() {
        let result = PlainTextExtractor::new().extract(&[0x66, 0x6f, 0xff]).await;
        assert!(matches!(result, Err(ExtractError::Utf8(_))));
    }
}
