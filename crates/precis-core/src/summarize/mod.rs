//! Extractive and abstractive summarizers.

pub mod abstractive;
pub mod extractive;
pub mod sentences;
mod stopwords;

pub use abstractive::{
    abstractive_summary, chunk_text, summarize_chunks, AbstractiveSummarizer, DEFAULT_CHUNK_CHARS,
};
pub use extractive::{extract_summary, ExtractiveSummarizer, DEFAULT_SENTENCE_COUNT};
pub use stopwords::is_stop_word;
