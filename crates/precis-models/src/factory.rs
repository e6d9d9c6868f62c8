//! Factory for creating summarization models.

use std::sync::Arc;

use precis_core::error::PrecisResult;
use precis_core::model_cache::{ModelCache, ModelFuture, ModelLoader};
use precis_core::traits::{ModelConfig, SummarizationModel};

use crate::huggingface::HuggingFaceSummarizer;

/// Factory for creating summarization models.
pub struct ModelFactory;

impl ModelFactory {
    /// Create a summarization model from the given configuration.
    pub fn create(config: ModelConfig) -> PrecisResult<Arc<dyn SummarizationModel>> {
        let model = HuggingFaceSummarizer::new(config)?;
        Ok(Arc::new(model))
    }

    /// Loader that builds the model from `config` each time it is invoked.
    pub fn loader(config: ModelConfig) -> ModelLoader {
        Arc::new(move || -> ModelFuture {
            let config = config.clone();
            Box::pin(async move { Self::create(config) })
        })
    }

    /// Lazily loading model cache for `config`.
    pub fn cache(config: &ModelConfig) -> ModelCache {
        ModelCache::new(config.model.clone(), Self::loader(config.clone()))
    }
}
