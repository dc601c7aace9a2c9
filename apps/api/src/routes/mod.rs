pub mod contact;
pub mod health;
pub mod resume;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Builds the API router. When `static_dir` is given, every other path is
/// served from it with `index.html` as the single-page-app fallback.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/contact", post(contact::handle_create_contact))
        .route("/api/resume", get(resume::handle_download_resume))
        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    }
}
