//! Summarization model trait and related types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PrecisResult;

/// Default pretrained sequence-to-sequence summarization model.
pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

/// Generation bounds passed to the model for every chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Minimum summary length in tokens.
    pub min_length: u32,
    /// Maximum summary length in tokens.
    pub max_length: u32,
    /// Whether to sample; `false` means deterministic decoding.
    pub do_sample: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            do_sample: false,
        }
    }
}

/// Core summarization model trait - all model providers implement this.
///
/// Implementations must be safe to call concurrently: one loaded handle is
/// shared by every in-flight request.
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    /// Produce a summary of `text` within the given bounds.
    async fn summarize(&self, text: &str, options: &GenerationOptions) -> PrecisResult<String>;

    /// Get the model identifier.
    fn model_name(&self) -> &str;
}

/// Summarization model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the inference endpoint (provider default when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Minimum summary length in tokens.
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    /// Maximum summary length in tokens.
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    /// Whether to sample.
    #[serde(default)]
    pub do_sample: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_min_length() -> u32 {
    30
}

fn default_max_length() -> u32 {
    130
}

impl ModelConfig {
    /// Generation options derived from this configuration.
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            min_length: self.min_length,
            max_length: self.max_length,
            do_sample: self.do_sample,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            do_sample: false,
        }
    }
}
