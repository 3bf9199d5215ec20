//! Folio web server.
//!
//! Serves the portfolio homepage and the epicycler demo page. The
//! homepage is built from the blueprint file on every request; when the
//! file has gone stale the project descriptions are refreshed from the
//! GitHub API and the file is rewritten before rendering.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{PageError, PageResult};
pub use state::AppState;

use anyhow::Context;
use axum::Router;
use catalog::ProjectCatalog;
use folio_github::GithubClient;
use folio_secret::{resolve_token, GITHUB_TOKEN_VAR};
use tokio::net::TcpListener;
use tracing::info;

/// Server builder for constructing and running the site.
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration.
    ///
    /// Resolves the GitHub credential up front; a missing token is
    /// fatal here rather than surfacing on the first stale render.
    pub fn new(config: ServerConfig) -> Result<Self, anyhow::Error> {
        let token = resolve_token(GITHUB_TOKEN_VAR, &config.secret_file)
            .context("credential resolution failed")?;
        let client = GithubClient::new(token).context("failed to build GitHub client")?;
        let catalog = ProjectCatalog::new(
            config.projects_path.clone(),
            client,
            config.refresh_after(),
        );
        let state = AppState::new(catalog);
        Ok(Self { config, state })
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone(), &self.config.static_dir)
    }

    /// Run the server, binding to the configured address.
    pub async fn run(self) -> Result<(), anyhow::Error> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;

        info!("Server listening on {}", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
