//! Route configuration for the Folio server.

mod pages;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the main application router.
///
/// Two pages, the static asset tree, and a rendered 404 for everything
/// else. There are no mutation-capable endpoints and no request
/// parameters anywhere.
pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(pages::homepage))
        .route("/epicycler/", get(pages::epicycler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
