//! Server configuration.
//!
//! Everything comes from `FOLIO_*` environment variables with defaults
//! matching the reference directory layout, so a bare `folio-server`
//! run from the site checkout just works.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Path of the projects blueprint file.
    pub projects_path: PathBuf,
    /// Dotenv-style file consulted when the token is not in the
    /// process environment.
    pub secret_file: PathBuf,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    /// Days after which a blueprint read triggers a description
    /// refresh. Zero refreshes on every read.
    pub refresh_after_days: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            projects_path: PathBuf::from("static/projects.json"),
            secret_file: PathBuf::from("data/.env"),
            static_dir: PathBuf::from("static"),
            refresh_after_days: 7,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `FOLIO_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("FOLIO_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("FOLIO_PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid FOLIO_PORT: {port}"))?;
        }
        if let Ok(path) = env::var("FOLIO_PROJECTS_PATH") {
            config.projects_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("FOLIO_SECRET_FILE") {
            config.secret_file = PathBuf::from(path);
        }
        if let Ok(path) = env::var("FOLIO_STATIC_DIR") {
            config.static_dir = PathBuf::from(path);
        }
        if let Ok(days) = env::var("FOLIO_REFRESH_AFTER_DAYS") {
            config.refresh_after_days = days
                .parse()
                .with_context(|| format!("invalid FOLIO_REFRESH_AFTER_DAYS: {days}"))?;
        }

        Ok(config)
    }

    /// The address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    /// The staleness threshold as a duration.
    pub fn refresh_after(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_after_days as i64)
    }
}
