//! Reading and writing the blueprint file.

use crate::model::{Blueprint, Project};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Errors from blueprint file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The blueprint file does not exist.
    #[error("blueprint not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The file exists but could not be read.
    #[error("failed to read blueprint: {path}")]
    Io {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file contents are not the expected JSON document.
    #[error("malformed blueprint JSON: {path}")]
    Parse {
        /// Path that was parsed.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed but `last_updated` is missing or invalid.
    #[error("invalid blueprint schema in {path}: {message}")]
    Schema {
        /// Path that was parsed.
        path: String,
        /// What was wrong with the document.
        message: String,
    },

    /// The blueprint could not be encoded for writing.
    #[error("failed to encode blueprint for {path}")]
    Encode {
        /// Target path.
        path: String,
        /// Underlying encode error.
        #[source]
        source: serde_json::Error,
    },

    /// The blueprint could not be written to disk.
    #[error("failed to write blueprint: {path}")]
    Write {
        /// Target path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Loosely-typed document shape, so a bad timestamp is reported as a
/// schema problem rather than a parse failure.
#[derive(Deserialize)]
struct RawBlueprint {
    #[serde(default)]
    last_updated: Option<serde_json::Value>,
    projects: Vec<Project>,
}

/// Read and validate the blueprint at `path`.
pub fn read(path: impl AsRef<Path>) -> Result<Blueprint, StoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => StoreError::NotFound {
            path: path.display().to_string(),
        },
        _ => StoreError::Io {
            path: path.display().to_string(),
            source: e,
        },
    })?;

    let raw: RawBlueprint = serde_json::from_str(&text).map_err(|e| StoreError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;

    let last_updated = match raw.last_updated {
        Some(serde_json::Value::String(stamp)) => DateTime::parse_from_rfc3339(&stamp)
            .map_err(|e| StoreError::Schema {
                path: path.display().to_string(),
                message: format!("last_updated {stamp:?} is not an ISO-8601 timestamp: {e}"),
            })?
            .with_timezone(&Utc),
        Some(other) => {
            return Err(StoreError::Schema {
                path: path.display().to_string(),
                message: format!("last_updated must be a string, got {other}"),
            })
        }
        None => {
            return Err(StoreError::Schema {
                path: path.display().to_string(),
                message: "last_updated is missing".to_string(),
            })
        }
    };

    Ok(Blueprint {
        last_updated,
        projects: raw.projects,
    })
}

/// Write `projects` to `path`, stamping the current UTC time as
/// `last_updated`. Returns the stamp that was written.
pub fn write(path: impl AsRef<Path>, projects: &[Project]) -> Result<DateTime<Utc>, StoreError> {
    let path = path.as_ref();
    let stamp = Utc::now();
    let document = Blueprint {
        last_updated: stamp,
        projects: projects.to_vec(),
    };

    let json = serde_json::to_string_pretty(&document).map_err(|e| StoreError::Encode {
        path: path.display().to_string(),
        source: e,
    })?;

    write_atomic(path, &json).map_err(|e| StoreError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), projects = projects.len(), "Blueprint written");
    Ok(stamp)
}

/// Write to a dot-prefixed sibling, then rename over the target, so a
/// reader never observes a half-written document.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut temp_path = path.to_path_buf();
    if let Some(name) = path.file_name() {
        temp_path.set_file_name(format!(".{}.tmp", name.to_string_lossy()));
    } else {
        temp_path.push(".tmp");
    }

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        e
    })
}
