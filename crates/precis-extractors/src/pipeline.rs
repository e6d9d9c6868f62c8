//! Extraction pipeline routing documents to the extractor for their kind.

use std::sync::Arc;

use tracing::debug;

use crate::error::ExtractResult;
use crate::types::{DocumentKind, ExtractedContent};
use crate::{Extractor, ExtractorFactory};

/// Pipeline holding one extractor per [`DocumentKind`].
///
/// Dispatch is an exhaustive match on the kind, so every kind always has an
/// extractor and there is no "unsupported type" path.
#[derive(Clone)]
pub struct ExtractionPipeline {
    plain_text: Arc<dyn Extractor>,
    pdf: Arc<dyn Extractor>,
    docx: Arc<dyn Extractor>,
    pptx: Arc<dyn Extractor>,
}

impl ExtractionPipeline {
    /// Create pipeline with the default extractor for every kind.
    pub fn with_defaults() -> Self {
        Self {
            plain_text: ExtractorFactory::for_kind(DocumentKind::PlainText),
            pdf: ExtractorFactory::for_kind(DocumentKind::Pdf),
            docx: ExtractorFactory::for_kind(DocumentKind::Docx),
            pptx: ExtractorFactory::for_kind(DocumentKind::Pptx),
        }
    }

    /// Replace the extractor used for its kind.
    pub fn with_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        match extractor.kind() {
            DocumentKind::PlainText => self.plain_text = extractor,
            DocumentKind::Pdf => self.pdf = extractor,
            DocumentKind::Docx => self.docx = extractor,
            DocumentKind::Pptx => self.pptx = extractor,
        }
        self
    }

    /// Extractor registered for a kind.
    pub fn extractor(&self, kind: DocumentKind) -> &Arc<dyn Extractor> {
        match kind {
            DocumentKind::PlainText => &self.plain_text,
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Docx => &self.docx,
            DocumentKind::Pptx => &self.pptx,
        }
    }

    /// Extract text from a document of the declared kind.
    pub async fn extract(
        &self,
        content: &[u8],
        kind: DocumentKind,
    ) -> ExtractResult<ExtractedContent> {
        let extractor = self.extractor(kind);
        debug!(
            kind = %kind,
            extractor = extractor.name(),
            bytes = content.len(),
            "Extracting document text"
        );
        extractor.extract(content).await
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractError;
    use async_trait::async_trait;
    use strum::IntoEnumIterator;

    struct FixedExtractor;

    #[async_trait]
    impl Extractor for FixedExtractor {
        async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
            Ok(ExtractedContent::new(
                "fixed".to_string(),
                DocumentKind::Pdf,
                content.len(),
            ))
        }

        fn kind(&self) -> DocumentKind {
            DocumentKind::Pdf
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_every_kind_has_matching_extractor() {
        let pipeline = ExtractionPipeline::with_defaults();
        for kind in DocumentKind::iter() {
            assert_eq!(pipeline.extractor(kind).kind(), kind);
        }
    }

    #[tokio::test]
    async fn test_pipeline_routes_plain_text() {
        let pipeline = ExtractionPipeline::with_defaults();
        let content = pipeline
            .extract(b"One. Two.", DocumentKind::PlainText)
            .await
            .unwrap();
        assert_eq!(content.text, "One. Two.");
    }

    #[tokio::test]
    async fn test_declared_kind_wins_over_content() {
        let pipeline = ExtractionPipeline::with_defaults();
        let result = pipeline.extract(b"hello world", DocumentKind::Docx).await;
        assert!(matches!(result, Err(ExtractError::Docx(_))));
    }

    #[tokio::test]
    async fn test_with_extractor_replaces_by_kind() {
        let pipeline = ExtractionPipeline::with_defaults().with_extractor(Arc::new(FixedExtractor));
        assert_eq!(pipeline.extractor(DocumentKind::Pdf).name(), "fixed");
        assert_eq!(pipeline.extractor(DocumentKind::Docx).name(), "docx-rs");

        let content = pipeline.extract(b"%PDF", DocumentKind::Pdf).await.unwrap();
        assert_eq!(content.text, "fixed");
    }
}
