//! precis-models - Summarization model providers for precis.
//!
//! This crate provides concrete [`SummarizationModel`] implementations and
//! the loader used by the shared [`precis_core::ModelCache`].
//!
//! # Supported Providers
//!
//! - **Hugging Face inference** - the hosted inference API or any endpoint
//!   speaking the same summarization protocol (`facebook/bart-large-cnn` by
//!   default)
//!
//! # Example
//!
//! ```ignore
//! use precis_models::ModelFactory;
//!
//! let cache = ModelFactory::cache(&config.model);
//! let model = cache.get_model().await?;
//! ```

mod factory;
mod huggingface;

pub use factory::ModelFactory;
pub use huggingface::{HuggingFaceSummarizer, HF_INFERENCE_URL};

// Re-export core types for convenience
pub use precis_core::traits::{GenerationOptions, ModelConfig, SummarizationModel};
