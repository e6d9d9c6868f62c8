//! precis-extractors - Text extraction for uploaded documents.
//!
//! Provides one extractor per supported document kind behind a shared
//! async trait, and a pipeline that dispatches on [`DocumentKind`].
//!
//! | Kind | Backend |
//! |------|---------|
//! | Plain text | UTF-8 decode |
//! | PDF | pdf-extract, per-page text concatenated |
//! | DOCX | docx-rs, body paragraphs joined with newlines |
//! | PPTX | zip + quick-xml, shape paragraphs joined with newlines |
//!
//! # Example
//!
//! ```ignore
//! use precis_extractors::{DocumentKind, ExtractionPipeline};
//!
//! let pipeline = ExtractionPipeline::with_defaults();
//! let content = pipeline.extract(&pdf_bytes, DocumentKind::Pdf).await?;
//! println!("{}", content.text);
//! ```

mod docx;
mod error;
mod factory;
mod pdf;
mod pipeline;
mod pptx;
mod text;
mod types;

pub use docx::DocxExtractor;
pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pdf::PdfExtractor;
pub use pipeline::ExtractionPipeline;
pub use pptx::PptxExtractor;
pub use text::PlainTextExtractor;
pub use types::{DocumentKind, DocumentStructure, ExtractedContent};

use async_trait::async_trait;

/// Core Extractor trait - all document extractors implement this.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from raw document bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Document kind this extractor handles.
    fn kind(&self) -> DocumentKind;

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
