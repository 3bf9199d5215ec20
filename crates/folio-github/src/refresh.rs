//! Best-effort description refresh over project records.

use crate::client::{GithubClient, GithubError};
use folio_blueprint::Project;

/// Per-project result of a refresh pass.
///
/// Failures are carried here instead of propagating, which keeps the
/// never-fail-the-page policy visible at the call site.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// No linked repository, or updates disabled for this record.
    Skipped,
    /// Description fetched. Upstream may legitimately have none.
    Fetched(Option<String>),
    /// The fetch failed and the stored description was cleared.
    Unavailable(GithubError),
}

impl RefreshOutcome {
    /// Whether the fetch was attempted and failed.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RefreshOutcome::Unavailable(_))
    }
}

/// Refresh one project's description from its linked repository.
///
/// Records without a `github` link, or with updates disabled, pass
/// through untouched and no network call is made.
pub async fn refresh_description(client: &GithubClient, project: &mut Project) -> RefreshOutcome {
    let Some(repo) = project.github_repo().map(str::to_string) else {
        return RefreshOutcome::Skipped;
    };

    if !project.update_description {
        return RefreshOutcome::Skipped;
    }

    match client.repo_description(&repo).await {
        Ok(description) => {
            project.description = description.clone();
            RefreshOutcome::Fetched(description)
        }
        Err(err) => {
            tracing::warn!(
                project = %project.name,
                repo = %repo,
                error = %err,
                "Description refresh failed"
            );
            project.description = None;
            RefreshOutcome::Unavailable(err)
        }
    }
}

/// Refresh every project in turn.
///
/// Sequential on purpose; each record is handled independently and a
/// failure in one never blocks the next.
pub async fn refresh_all(client: &GithubClient, projects: &mut [Project]) -> Vec<RefreshOutcome> {
    let mut outcomes = Vec::with_capacity(projects.len());
    for project in projects.iter_mut() {
        outcomes.push(refresh_description(client, project).await);
    }

    let failed = outcomes.iter().filter(|o| o.is_unavailable()).count();
    tracing::debug!(
        total = outcomes.len(),
        failed,
        "Description refresh pass complete"
    );
    outcomes
}
