//! precis-core - Core library for precis.
//!
//! This crate provides the summarizers, the shared model cache, summary
//! types and statistics, and configuration for the precis document
//! summarization service.
//!
//! # Example
//!
//! ```ignore
//! use precis_core::{extract_summary, AbstractiveSummarizer, ModelCache};
//!
//! let summary = extract_summary(&text, 5);
//!
//! let cache = Arc::new(ModelCache::new("facebook/bart-large-cnn", loader));
//! let abstractive = AbstractiveSummarizer::new(cache).summarize(&text).await?;
//! ```

pub mod config;
pub mod error;
pub mod model_cache;
pub mod summarize;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{PrecisConfig, ServerConfig, SummarizerConfig};
pub use error::{PrecisError, PrecisResult};
pub use model_cache::{ModelCache, ModelFuture, ModelLoader};
pub use summarize::{
    abstractive_summary, extract_summary, AbstractiveSummarizer, ExtractiveSummarizer,
};
pub use traits::{GenerationOptions, ModelConfig, SummarizationModel, DEFAULT_MODEL};
pub use types::{CompressionRatio, SummaryKind, SummaryMethod, SummaryReport, SummaryStats};
