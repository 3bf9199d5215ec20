//! Page error types and their HTML responses.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_blueprint::StoreError;
use thiserror::Error;
use tracing::error;

/// Result type for page handlers.
pub type PageResult<T> = Result<T, PageError>;

/// Errors a page render can fail with.
///
/// There is no recovery path for any of these; the request gets a
/// rendered error page.
#[derive(Debug, Error)]
pub enum PageError {
    /// The blueprint could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A template failed to render.
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl PageError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for the logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Store(_) => "store_error",
            Self::Render(_) => "render_error",
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: u16,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        error!(
            error = %self,
            code = self.error_code(),
            "Request failed"
        );

        let status = self.status_code();
        let page = ErrorTemplate {
            status: status.as_u16(),
        };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, "something went wrong").into_response(),
        }
    }
}
