//! GitHub token resolution.

use crate::SecretString;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the GitHub API token.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_API_TOKEN";

/// Errors from credential resolution.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Neither the process environment nor the fallback file yielded a
    /// usable token.
    #[error("no usable {var} token in the process environment or {path}")]
    NotFound {
        /// Variable that was looked up.
        var: String,
        /// Fallback file that was consulted.
        path: String,
    },

    /// The fallback file exists but could not be parsed.
    #[error("failed to read credential file {path}")]
    EnvFile {
        /// File that was read.
        path: String,
        /// Underlying parse error.
        #[source]
        source: dotenvy::Error,
    },
}

/// Resolve an API token: prefer the already-set process variable, then
/// fall back to a `key=value` dotenv-style file.
///
/// The fallback file is parsed in place rather than loaded into the
/// process environment, so resolution never mutates global state.
pub fn resolve_token(var: &str, env_file: &Path) -> Result<SecretString, CredentialError> {
    if let Ok(value) = env::var(var) {
        if !value.trim().is_empty() {
            tracing::debug!(var, "Credential resolved from process environment");
            return Ok(SecretString::new(value));
        }
    }

    if env_file.exists() {
        let entries = dotenvy::from_path_iter(env_file).map_err(|e| CredentialError::EnvFile {
            path: env_file.display().to_string(),
            source: e,
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| CredentialError::EnvFile {
                path: env_file.display().to_string(),
                source: e,
            })?;
            if key == var && !value.trim().is_empty() {
                tracing::debug!(
                    var,
                    path = %env_file.display(),
                    "Credential resolved from env file"
                );
                return Ok(SecretString::new(value));
            }
        }
    }

    Err(CredentialError::NotFound {
        var: var.to_string(),
        path: env_file.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_environment_takes_precedence() {
        let dir = tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "FOLIO_TEST_TOKEN_PRECEDENCE=from-file\n").unwrap();

        env::set_var("FOLIO_TEST_TOKEN_PRECEDENCE", "from-env");
        let token = resolve_token("FOLIO_TEST_TOKEN_PRECEDENCE", &env_file).unwrap();
        env::remove_var("FOLIO_TEST_TOKEN_PRECEDENCE");

        assert_eq!(token.expose(), "from-env");
    }

    #[test]
    fn test_falls_back_to_env_file() {
        let dir = tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(
            &env_file,
            "OTHER_KEY=ignored\nFOLIO_TEST_TOKEN_FILE=ghp_from_file\n",
        )
        .unwrap();

        let token = resolve_token("FOLIO_TEST_TOKEN_FILE", &env_file).unwrap();
        assert_eq!(token.expose(), "ghp_from_file");
    }

    #[test]
    fn test_file_fallback_does_not_mutate_process_env() {
        let dir = tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "FOLIO_TEST_TOKEN_ISOLATED=ghp_isolated\n").unwrap();

        resolve_token("FOLIO_TEST_TOKEN_ISOLATED", &env_file).unwrap();
        assert!(env::var("FOLIO_TEST_TOKEN_ISOLATED").is_err());
    }

    #[test]
    fn test_missing_everywhere_is_an_error() {
        let dir = tempdir().unwrap();
        let result = resolve_token("FOLIO_TEST_TOKEN_ABSENT", &dir.path().join(".env"));
        assert!(matches!(result, Err(CredentialError::NotFound { .. })));
    }

    #[test]
    fn test_empty_value_is_not_usable() {
        let dir = tempdir().unwrap();
        let env_file = dir.path().join(".env");
        fs::write(&env_file, "FOLIO_TEST_TOKEN_EMPTY=\n").unwrap();

        let result = resolve_token("FOLIO_TEST_TOKEN_EMPTY", &env_file);
        assert!(matches!(result, Err(CredentialError::NotFound { .. })));
    }
}
