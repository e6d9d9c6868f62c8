//! Process-wide cache for the abstractive summarization model.
//!
//! The model is loaded lazily on first use and shared by every request for
//! the rest of the process lifetime. Concurrent first callers wait on a
//! single load; a failed load is not cached, so the next caller retries.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::error::PrecisResult;
use crate::traits::SummarizationModel;

/// Future resolving to a loaded model.
pub type ModelFuture = BoxFuture<'static, PrecisResult<Arc<dyn SummarizationModel>>>;

/// Async loader producing the shared model handle.
pub type ModelLoader = Arc<dyn Fn() -> ModelFuture + Send + Sync>;

/// Lazily initialized, shared summarization model.
pub struct ModelCache {
    model_id: String,
    cell: OnceCell<Arc<dyn SummarizationModel>>,
    loader: ModelLoader,
}

impl ModelCache {
    /// Create a cache that loads `model_id` with `loader` on first use.
    pub fn new(model_id: impl Into<String>, loader: ModelLoader) -> Self {
        Self {
            model_id: model_id.into(),
            cell: OnceCell::new(),
            loader,
        }
    }

    /// Create a cache that already holds a loaded model.
    pub fn preloaded(model: Arc<dyn SummarizationModel>) -> Self {
        let model_id = model.model_name().to_string();
        let cached = Arc::clone(&model);
        Self {
            model_id,
            cell: OnceCell::from(model),
            loader: Arc::new(move || -> ModelFuture {
                let model = Arc::clone(&cached);
                Box::pin(async move { Ok(model) })
            }),
        }
    }

    /// Get the shared model, loading it on first use.
    pub async fn get_model(&self) -> PrecisResult<Arc<dyn SummarizationModel>> {
        let model = self
            .cell
            .get_or_try_init(|| async {
                info!(model = %self.model_id, "Loading summarization model");
                let result = (self.loader)().await;
                if let Err(e) = &result {
                    warn!(model = %self.model_id, error = %e, "Failed to load summarization model");
                }
                result
            })
            .await?;
        Ok(Arc::clone(model))
    }

    /// Whether the model has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Configured model identifier.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCache")
            .field("model_id", &self.model_id)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
