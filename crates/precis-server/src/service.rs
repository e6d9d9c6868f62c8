//! Document processing: extract, summarize, compute statistics.

use std::collections::BTreeMap;

use tracing::{info, warn};

use precis_core::error::{PrecisError, PrecisResult};
use precis_core::summarize::{AbstractiveSummarizer, ExtractiveSummarizer};
use precis_core::types::{SummaryKind, SummaryMethod, SummaryReport};
use precis_extractors::ExtractionPipeline;

use crate::error::ProcessingError;
use crate::session::UploadedDocument;

/// Runs one "Generate Summary" request end to end.
pub struct SummaryService {
    pipeline: ExtractionPipeline,
    extractive: ExtractiveSummarizer,
    abstractive: AbstractiveSummarizer,
}

impl SummaryService {
    pub fn new(
        pipeline: ExtractionPipeline,
        extractive: ExtractiveSummarizer,
        abstractive: AbstractiveSummarizer,
    ) -> Self {
        Self {
            pipeline,
            extractive,
            abstractive,
        }
    }

    /// Abstractive summarizer, exposing the shared model cache.
    pub fn abstractive(&self) -> &AbstractiveSummarizer {
        &self.abstractive
    }

    /// Extract the document text and produce the summaries for `method`.
    ///
    /// Any failure aborts the whole run; no partial report is returned.
    pub async fn process(
        &self,
        document: &UploadedDocument,
        method: SummaryMethod,
    ) -> Result<SummaryReport, ProcessingError> {
        let content = self.pipeline.extract(&document.bytes, document.kind).await?;
        info!(
            filename = %document.filename,
            kind = %document.kind,
            method = %method,
            chars = content.char_len(),
            pages = content.structure.page_count,
            slides = content.structure.slide_count,
            paragraphs = content.structure.paragraph_count,
            "Text extracted"
        );
        if content.is_empty() {
            warn!(filename = %document.filename, "Document contains no text");
        }
        let text = content.into_text();

        let mut summaries = BTreeMap::new();
        for kind in method.kinds() {
            let summary = match kind {
                SummaryKind::Extraction => extract_off_runtime(self.extractive, &text).await?,
                SummaryKind::Abstractive => self.abstractive.summarize(&text).await?,
            };
            summaries.insert(*kind, summary);
        }

        let report = SummaryReport::new(method, text, summaries);
        info!(
            original = report.stats.original_length,
            total_summary = report.stats.total_summary_length,
            ratio = %report.stats.compression_ratio,
            "Summary report ready"
        );
        Ok(report)
    }
}

/// Run the Luhn summarizer on the blocking pool (CPU-bound on large texts).
async fn extract_off_runtime(
    summarizer: ExtractiveSummarizer,
    text: &str,
) -> PrecisResult<String> {
    let text = text.to_string();
    tokio::task::spawn_blocking(move || summarizer.summarize(&text))
        .await
        .map_err(|e| PrecisError::Internal(format!("Extractive summarizer task failed: {}", e)))
}
