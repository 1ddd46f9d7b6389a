//! The Factlens HTTP surface.
//!
//! Four JSON routes over the services in `factlens-core`:
//!
//! - `POST /api/extractclaims`: free text in, claims out
//! - `POST /api/verifyclaims`: one claim plus sources in, a verdict out
//! - `POST /api/searchsources`: a query in, candidate sources out
//! - `POST /api/upload`: multipart file in, ingest report out
//!
//! Every error answers as `{"error": "<message>"}` with the status mapping
//! of the shared taxonomy (see [`error`]).
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod error;
pub mod gateway;
pub mod handlers;
pub mod state;

pub use state::AppState;

/// Slack for multipart framing on top of the configured file cap.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let body_limit = DefaultBodyLimit::max(state.max_file_bytes as usize + MULTIPART_OVERHEAD);

    Router::new()
        .route("/api/extractclaims", post(handlers::extract_claims))
        .route("/api/verifyclaims", post(handlers::verify_claims))
        .route("/api/searchsources", post(handlers::search_sources))
        .route("/api/upload", post(handlers::upload))
        .layer(cors)
        .layer(body_limit)
        .with_state(Arc::new(state))
}
