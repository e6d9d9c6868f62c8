//! precis-server - Web front end for precis.
//!
//! Serves the upload form, runs extraction and summarization for each
//! "Generate Summary" press, and offers the summaries as downloads.
//!
//! # Example
//!
//! ```ignore
//! use precis_core::PrecisConfig;
//! use precis_server::{create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let state = AppState::new(PrecisConfig::default());
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod session;
pub mod state;
pub mod views;

pub use error::{ApiError, ApiResult, ProcessingError};
pub use factory::{create_service, create_service_with_cache};
pub use service::SummaryService;
pub use session::{Session, SessionStore, UploadedDocument};
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;
    routes::create_router(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
