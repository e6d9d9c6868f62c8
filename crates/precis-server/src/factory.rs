//! Factory for assembling the summary service from configuration.

use std::sync::Arc;

use precis_core::config::PrecisConfig;
use precis_core::model_cache::ModelCache;
use precis_core::summarize::{AbstractiveSummarizer, ExtractiveSummarizer};
use precis_extractors::ExtractionPipeline;
use precis_models::ModelFactory;

use crate::service::SummaryService;

/// Create the summary service, loading the configured model lazily.
pub fn create_service(config: &PrecisConfig) -> SummaryService {
    let cache = Arc::new(ModelFactory::cache(&config.model));
    create_service_with_cache(config, cache)
}

/// Create the summary service around an existing model cache.
pub fn create_service_with_cache(config: &PrecisConfig, cache: Arc<ModelCache>) -> SummaryService {
    let extractive = ExtractiveSummarizer::new(config.summarizer.sentence_count);
    let abstractive = AbstractiveSummarizer::new(cache)
        .with_chunk_chars(config.summarizer.chunk_chars)
        .with_options(config.model.generation_options());

    SummaryService::new(ExtractionPipeline::with_defaults(), extractive, abstractive)
}
