//! Project aggregation.
//!
//! Reads the blueprint, runs the staleness-gated description refresh,
//! and derives the views the homepage renders.

use chrono::Utc;
use folio_blueprint::{derive_tags, sort_projects, store, Project, StoreError};
use folio_github::{refresh_all, GithubClient};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Everything the homepage needs.
#[derive(Debug, Clone)]
pub struct ProjectData {
    /// Projects, sorted ascending by name.
    pub projects: Vec<Project>,
    /// Derived tag set, case-folded and sorted.
    pub tags: Vec<String>,
}

/// Orchestrates the blueprint store and the description refresher.
pub struct ProjectCatalog {
    projects_path: PathBuf,
    client: GithubClient,
    refresh_after: chrono::Duration,
    // Serializes refresh-and-write cycles; two concurrent stale reads
    // must not interleave rewrites of the blueprint file.
    refresh_lock: Mutex<()>,
}

impl ProjectCatalog {
    /// Create a catalog over the blueprint at `projects_path`.
    pub fn new(
        projects_path: PathBuf,
        client: GithubClient,
        refresh_after: chrono::Duration,
    ) -> Self {
        Self {
            projects_path,
            client,
            refresh_after,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Read the blueprint, refresh descriptions when it has gone
    /// stale, and return the sorted projects plus derived tags.
    ///
    /// Store errors on the initial read are propagated; everything
    /// after that is best effort. A failed rewrite is logged and the
    /// page is served from the refreshed data in hand.
    pub async fn project_data(&self) -> Result<ProjectData, StoreError> {
        let blueprint = store::read(&self.projects_path)?;
        let stale = blueprint.age(Utc::now()) >= self.refresh_after;
        let last_updated = blueprint.last_updated;
        let mut projects = blueprint.projects;

        if stale {
            let _guard = self.refresh_lock.lock().await;
            tracing::info!(
                path = %self.projects_path.display(),
                %last_updated,
                "Blueprint stale, refreshing descriptions"
            );

            refresh_all(&self.client, &mut projects).await;

            if let Err(err) = store::write(&self.projects_path, &projects) {
                tracing::warn!(
                    error = %err,
                    "Failed to persist refreshed blueprint, serving refreshed data anyway"
                );
            }
        }

        sort_projects(&mut projects);
        let tags = derive_tags(&projects);
        Ok(ProjectData { projects, tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use folio_github::GithubConfig;
    use folio_secret::SecretString;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GithubClient {
        let config = GithubConfig {
            api_base: server.uri(),
            ..GithubConfig::default()
        };
        GithubClient::with_config(config, SecretString::new("test-token".to_string())).unwrap()
    }

    fn write_blueprint(path: &Path, age_days: i64) {
        let last_updated = (Utc::now() - Duration::days(age_days)).to_rfc3339();
        let document = serde_json::json!({
            "last_updated": last_updated,
            "projects": [
                {
                    "name": "B-project",
                    "tags": ["Web"],
                    "links": {"github": "octocat/b-project"},
                    "description": "stale"
                },
                {
                    "name": "A-project",
                    "tags": ["featured", "CLI"]
                }
            ]
        });
        fs::write(path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_stale_blueprint_triggers_refresh_and_write() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/repos/octocat/b-project"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "description": "fresh" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        write_blueprint(&path, 10);

        let catalog = ProjectCatalog::new(path.clone(), client_for(&server), Duration::days(7));
        let data = catalog.project_data().await.unwrap();

        let names: Vec<&str> = data.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A-project", "B-project"]);
        assert_eq!(data.projects[1].description.as_deref(), Some("fresh"));
        assert_eq!(data.tags, vec!["cli", "web"]);

        // The file was rewritten with a fresh stamp and the new description.
        let rewritten = store::read(&path).unwrap();
        assert!(rewritten.age(Utc::now()) < Duration::days(1));
        let refreshed = rewritten
            .projects
            .iter()
            .find(|p| p.name == "B-project")
            .unwrap();
        assert_eq!(refreshed.description.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_fresh_blueprint_skips_refresh_entirely() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        write_blueprint(&path, 1);
        let before = fs::read_to_string(&path).unwrap();

        let catalog = ProjectCatalog::new(path.clone(), client_for(&server), Duration::days(7));
        let data = catalog.project_data().await.unwrap();

        // Sorted and tagged, but untouched on disk and no network call.
        assert_eq!(data.projects[0].name, "A-project");
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn test_zero_threshold_refreshes_every_read() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/repos/octocat/b-project"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "description": "fresh" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        write_blueprint(&path, 0);

        let catalog = ProjectCatalog::new(path.clone(), client_for(&server), Duration::days(0));
        let data = catalog.project_data().await.unwrap();
        assert_eq!(data.projects[1].description.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_failed_fetch_still_serves_the_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        let path = dir.path().join("projects.json");
        write_blueprint(&path, 10);

        let catalog = ProjectCatalog::new(path.clone(), client_for(&server), Duration::days(7));
        let data = catalog.project_data().await.unwrap();

        // The failing repository degrades to no description.
        let degraded = data.projects.iter().find(|p| p.name == "B-project").unwrap();
        assert_eq!(degraded.description, None);
    }

    #[tokio::test]
    async fn test_store_errors_propagate() {
        let server = MockServer::start().await;
        let dir = tempdir().unwrap();

        let catalog = ProjectCatalog::new(
            dir.path().join("absent.json"),
            client_for(&server),
            Duration::days(7),
        );
        let result = catalog.project_data().await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }
}
