//! Shared application state.

use crate::catalog::ProjectCatalog;
use std::sync::Arc;

/// State shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The project aggregation service.
    pub catalog: Arc<ProjectCatalog>,
}

impl AppState {
    /// Wrap a catalog for sharing across handlers.
    pub fn new(catalog: ProjectCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
