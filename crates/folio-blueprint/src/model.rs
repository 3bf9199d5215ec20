//! Project records and the persisted blueprint document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Link label under which a project's GitHub repository identifier is stored.
pub const GITHUB_LINK: &str = "github";

/// A single portfolio entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Display name. Unique within the collection and used as the sort key.
    pub name: String,
    /// Free-form tags. The `featured` tag marks highlight entries.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Outbound links keyed by label. The `github` entry holds an
    /// `owner/name` repository identifier.
    #[serde(default)]
    pub links: BTreeMap<String, String>,
    /// Short description, mirrored from the linked repository when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the description may be overwritten from the live repository.
    #[serde(default = "default_true")]
    pub update_description: bool,
    /// Preview image path, shown only when the listing enables images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Fields this server does not interpret. Preserved across rewrites.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl Project {
    /// The `owner/name` identifier of the linked GitHub repository, if any.
    pub fn github_repo(&self) -> Option<&str> {
        self.links.get(GITHUB_LINK).map(String::as_str)
    }
}

/// The persisted unit: every project plus the time of the last rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    /// When the file was last written, UTC.
    pub last_updated: DateTime<Utc>,
    /// The project records, in file order.
    pub projects: Vec<Project>,
}

impl Blueprint {
    /// Time elapsed since the blueprint was last written.
    pub fn age(&self, now: DateTime<Utc>) -> chrono::Duration {
        now.signed_duration_since(self.last_updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_description_defaults_to_true() {
        let project: Project = serde_json::from_str(r#"{"name": "folio"}"#).unwrap();
        assert!(project.update_description);
        assert!(project.tags.is_empty());
        assert!(project.links.is_empty());
        assert!(project.description.is_none());
    }

    #[test]
    fn test_github_repo_lookup() {
        let project: Project = serde_json::from_str(
            r#"{"name": "folio", "links": {"github": "octocat/folio", "docs": "https://example.com"}}"#,
        )
        .unwrap();
        assert_eq!(project.github_repo(), Some("octocat/folio"));

        let unlinked: Project = serde_json::from_str(r#"{"name": "folio"}"#).unwrap();
        assert_eq!(unlinked.github_repo(), None);
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let json = r#"{"name": "folio", "stars": 42, "homepage": "https://example.com"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.extra["stars"], serde_json::json!(42));

        let round_tripped: Project =
            serde_json::from_str(&serde_json::to_string(&project).unwrap()).unwrap();
        assert_eq!(round_tripped, project);
    }

    #[test]
    fn test_blueprint_age() {
        let blueprint = Blueprint {
            last_updated: "2026-01-01T00:00:00Z".parse().unwrap(),
            projects: Vec::new(),
        };
        let now = "2026-01-11T00:00:00Z".parse().unwrap();
        assert_eq!(blueprint.age(now), chrono::Duration::days(10));
    }
}
