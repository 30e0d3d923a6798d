//! Project path management
//!
//! Handles project root detection and data path resolution.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::config::Config;

/// Environment variable for project root configuration
pub const HOME_ENV: &str = "IDIOM2VEC_HOME";

/// Project paths wrapper that combines config and resolved paths
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub slide_tsv: PathBuf,
    pub idiom_matcher: PathBuf,
    pub lemma_table: Option<PathBuf>,
    pub config: Config,
}

impl ProjectPaths {
    /// Create ProjectPaths from environment variable or current directory.
    /// Loads config from project root.
    pub fn new() -> Result<Self> {
        let root = get_project_root()?;
        Ok(Self::from_root(root))
    }

    pub fn from_root(root: PathBuf) -> Self {
        let config = Config::load(&root);
        Self::from_root_with_config(root, config)
    }

    pub fn from_root_with_config(root: PathBuf, config: Config) -> Self {
        let resolved = config.resolve_paths(&root);
        Self {
            root,
            slide_tsv: resolved.slide_tsv,
            idiom_matcher: resolved.idiom_matcher,
            lemma_table: resolved.lemma_table,
            config,
        }
    }
}

/// Get project root from environment variable or current directory.
/// Priority: IDIOM2VEC_HOME env var > current directory
pub fn get_project_root() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(HOME_ENV) {
        let root = PathBuf::from(&path);
        if root.exists() {
            return Ok(root);
        }
        tracing::warn!(
            "{} is set to '{}' but path does not exist. Falling back to current directory.",
            HOME_ENV,
            path
        );
    }
    std::env::current_dir().context("Failed to get current directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_root_uses_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(super::super::config::CONFIG_FILE),
            r#"{"data": {"idiomMatcher": "artifacts/matcher.bin"}}"#,
        )
        .unwrap();

        let paths = ProjectPaths::from_root(dir.path().to_path_buf());
        assert_eq!(paths.idiom_matcher, dir.path().join("artifacts/matcher.bin"));
        assert_eq!(paths.slide_tsv, dir.path().join("data/slide.tsv"));
    }
}
