//! Abstractive summarization over fixed-size character chunks.
//!
//! Text is cut into contiguous chunks of at most [`DEFAULT_CHUNK_CHARS`]
//! characters, each chunk is summarized by the model in order, and the
//! chunk summaries are joined with single spaces. Chunk boundaries may fall
//! mid-word.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::PrecisResult;
use crate::model_cache::ModelCache;
use crate::traits::{GenerationOptions, SummarizationModel};

/// Maximum characters per model input chunk.
pub const DEFAULT_CHUNK_CHARS: usize = 1024;

/// Split `text` into contiguous chunks of at most `max_chars` characters.
///
/// Returns no chunks for empty text. A `max_chars` of zero is treated as one.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Summarize every chunk of `text` with `model` and join the results.
///
/// The first model error aborts the whole call.
pub async fn summarize_chunks(
    model: &dyn SummarizationModel,
    text: &str,
    chunk_chars: usize,
    options: &GenerationOptions,
) -> PrecisResult<String> {
    let chunks = chunk_text(text, chunk_chars);
    debug!(chunks = chunks.len(), model = model.model_name(), "Summarizing chunks");

    let mut summaries = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.iter().enumerate() {
        let summary = model.summarize(chunk, options).await?;
        debug!(chunk = i, input_chars = chunk.chars().count(), "Chunk summarized");
        summaries.push(summary);
    }

    Ok(summaries.join(" "))
}

/// Summarize `text` with the default chunk size and generation bounds.
pub async fn abstractive_summary(model: &dyn SummarizationModel, text: &str) -> PrecisResult<String> {
    summarize_chunks(model, text, DEFAULT_CHUNK_CHARS, &GenerationOptions::default()).await
}

/// Abstractive summarizer bound to the shared model cache.
#[derive(Debug, Clone)]
pub struct AbstractiveSummarizer {
    cache: Arc<ModelCache>,
    chunk_chars: usize,
    options: GenerationOptions,
}

impl AbstractiveSummarizer {
    /// Create a summarizer with default chunking and generation bounds.
    pub fn new(cache: Arc<ModelCache>) -> Self {
        Self {
            cache,
            chunk_chars: DEFAULT_CHUNK_CHARS,
            options: GenerationOptions::default(),
        }
    }

    /// Set the chunk size in characters.
    pub fn with_chunk_chars(mut self, chunk_chars: usize) -> Self {
        self.chunk_chars = chunk_chars;
        self
    }

    /// Set the generation bounds.
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Summarize `text`, loading the model on first use.
    ///
    /// Empty text returns an empty summary without touching the model.
    pub async fn summarize(&self, text: &str) -> PrecisResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let model = self.cache.get_model().await?;
        let summary =
            summarize_chunks(model.as_ref(), text, self.chunk_chars, &self.options).await?;
        info!(
            input_chars = text.chars().count(),
            summary_chars = summary.chars().count(),
            "Abstractive summary generated"
        );
        Ok(summary)
    }

    /// The shared model cache.
    pub fn cache(&self) -> &Arc<ModelCache> {
        &self.cache
    }
}
