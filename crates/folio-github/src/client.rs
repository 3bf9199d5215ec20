//! GitHub API client configuration.

use folio_secret::SecretString;
use reqwest::{header, Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// API base URL. Tests point this at a local mock server.
    pub api_base: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Request timeout.
    pub request_timeout: Duration,
    /// User agent string. GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("folio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// GitHub API errors.
#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The repository does not exist or is not visible to the token.
    #[error("repository not found: {repo}")]
    NotFound {
        /// The `owner/name` identifier that was requested.
        repo: String,
    },

    /// The token was rejected.
    #[error("authentication rejected: {status}")]
    Auth {
        /// HTTP status returned by the API.
        status: u16,
    },

    /// The API asked us to back off.
    #[error("rate limited (retry after {retry_after:?})")]
    RateLimited {
        /// Server-suggested wait, if one was sent.
        retry_after: Option<Duration>,
    },

    /// Any other non-success response.
    #[error("unexpected API response: {status}")]
    Api {
        /// HTTP status returned by the API.
        status: u16,
        /// Response body, for the logs.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("failed to decode API response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<reqwest::Error> for GithubError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GithubError::Timeout
        } else {
            GithubError::Request(e)
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    // GitHub sends an explicit null for repositories without one.
    description: Option<String>,
}

/// Authenticated client for the GitHub REST API.
pub struct GithubClient {
    inner: Client,
    api_base: String,
    token: SecretString,
}

impl GithubClient {
    /// Create a client with default configuration.
    pub fn new(token: SecretString) -> Result<Self, GithubError> {
        Self::with_config(GithubConfig::default(), token)
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: GithubConfig, token: SecretString) -> Result<Self, GithubError> {
        let inner = ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            inner,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Fetch the description of the repository identified by `owner/name`.
    ///
    /// `Ok(None)` means the repository exists but has no description.
    pub async fn repo_description(&self, repo: &str) -> Result<Option<String>, GithubError> {
        let url = format!("{}/repos/{}", self.api_base, repo);
        tracing::debug!(%url, "Fetching repository metadata");

        let response = self
            .inner
            .get(&url)
            .bearer_auth(self.token.expose())
            .header(header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(GithubError::from)?;

        let status = response.status();
        tracing::debug!(%status, %url, "Repository metadata response");

        let response = check_response(repo, response).await?;
        let info: RepoInfo = response.json().await.map_err(GithubError::Decode)?;
        Ok(info.description)
    }
}

/// Check response status and convert errors.
async fn check_response(
    repo: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, GithubError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(GithubError::NotFound {
            repo: repo.to_string(),
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GithubError::Auth {
            status: status.as_u16(),
        }),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs);

            Err(GithubError::RateLimited { retry_after })
        }
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(GithubError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
