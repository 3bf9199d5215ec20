//! Derived views over the project list.

use crate::model::Project;
use std::collections::BTreeSet;

/// Tag excluded from the derived display set. It marks highlight
/// entries and stays on the underlying records.
pub const FEATURED_TAG: &str = "featured";

/// Case-folded, deduplicated, ascending-sorted tags across `projects`,
/// with [`FEATURED_TAG`] removed.
pub fn derive_tags(projects: &[Project]) -> Vec<String> {
    let tags: BTreeSet<String> = projects
        .iter()
        .flat_map(|project| project.tags.iter())
        .map(|tag| tag.to_lowercase())
        .filter(|tag| tag != FEATURED_TAG)
        .collect();
    tags.into_iter().collect()
}

/// Sort projects ascending by name. The sort is stable, so records
/// sharing a name keep their file order.
pub fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| a.name.cmp(&b.name));
}
