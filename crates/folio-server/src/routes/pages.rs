//! Page handlers.

use crate::error::PageResult;
use crate::state::AppState;
use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_blueprint::Project;

/// Whether project preview images are rendered on the listing.
const SHOW_IMAGES: bool = false;

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate {
    projects: Vec<Project>,
    tags: Vec<String>,
    show_images: bool,
}

#[derive(Template)]
#[template(path = "epicycler.html")]
struct EpicyclerTemplate;

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

/// Render the homepage listing.
pub async fn homepage(State(state): State<AppState>) -> PageResult<Html<String>> {
    let data = state.catalog.project_data().await?;
    let page = HomeTemplate {
        projects: data.projects,
        tags: data.tags,
        show_images: SHOW_IMAGES,
    };
    Ok(Html(page.render()?))
}

/// Render the epicycler demo page.
pub async fn epicycler() -> PageResult<Html<String>> {
    Ok(Html(EpicyclerTemplate.render()?))
}

/// Rendered 404 for unmatched routes.
pub async fn not_found() -> Response {
    match NotFoundTemplate.render() {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "page not found").into_response(),
    }
}
