//! Route definitions for the web front end.

mod documents;
mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Upload form
        .route("/", get(documents::index))
        .route("/documents", post(documents::upload_document))
        // Uploaded document
        .route("/documents/:id", get(documents::show_document))
        .route("/documents/:id/summary", post(documents::generate_summary))
        .route(
            "/documents/:id/downloads/:kind",
            get(documents::download_summary),
        )
        // Attach state
        .with_state(state)
}

pub use documents::*;
pub use health::*;
