//! idiom2vec configuration module
//!
//! Loaded from `.idiom2vec.json` under the project root. Every field has a
//! default, so a partial (or missing) file is fine.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::idioms::FilterConfig;

pub const CONFIG_FILE: &str = ".idiom2vec.json";
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub filter: FilterConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

/// Data files, relative to the project root unless absolute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Idiom reference list (TSV with a header row)
    #[serde(default = "default_slide_tsv", rename = "slideTsv")]
    pub slide_tsv: String,

    #[serde(default = "default_idiom_matcher", rename = "idiomMatcher")]
    pub idiom_matcher: String,

    /// Optional `form<TAB>lemma` table for the lemmatizer
    #[serde(default, rename = "lemmaTable")]
    pub lemma_table: Option<String>,
}

fn default_slide_tsv() -> String {
    "data/slide.tsv".to_string()
}

fn default_idiom_matcher() -> String {
    "data/idiom_matcher.bin".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            slide_tsv: default_slide_tsv(),
            idiom_matcher: default_idiom_matcher(),
            lemma_table: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: DataConfig::default(),
            filter: FilterConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&config_path) {
            Ok(config) => {
                if config.version > CONFIG_VERSION {
                    tracing::warn!(
                        "Config version {} is newer than supported version {}.",
                        config.version,
                        CONFIG_VERSION
                    );
                }
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}. Using defaults.", CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        fs::create_dir_all(root)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(root.join(CONFIG_FILE), content)?;
        Ok(())
    }

    /// Generate default config file content
    pub fn default_json() -> Result<String> {
        Ok(serde_json::to_string_pretty(&Config::default())?)
    }

    /// Get resolved paths based on project root
    pub fn resolve_paths(&self, root: &Path) -> ResolvedPaths {
        ResolvedPaths {
            root: root.to_path_buf(),
            slide_tsv: root.join(&self.data.slide_tsv),
            idiom_matcher: root.join(&self.data.idiom_matcher),
            lemma_table: self.data.lemma_table.as_ref().map(|p| root.join(p)),
        }
    }
}

/// Resolved absolute paths for the project
#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub root: PathBuf,
    pub slide_tsv: PathBuf,
    pub idiom_matcher: PathBuf,
    pub lemma_table: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.filter.min_word_count, 3);
        assert_eq!(config.filter.min_length, 14);
        assert!(config.data.lemma_table.is_none());
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{"filter": {"minLength": 10}, "data": {"lemmaTable": "data/lemmas.tsv"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.filter.min_length, 10);
        assert_eq!(config.filter.exceptions, vec!["if needs be".to_string()]);
        assert_eq!(config.data.slide_tsv, "data/slide.tsv");
        assert_eq!(config.data.lemma_table.as_deref(), Some("data/lemmas.tsv"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.filter.min_word_count = 4;
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path());
        assert_eq!(loaded.filter.min_word_count, 4);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let config = Config::load(dir.path());
        assert_eq!(config.filter, FilterConfig::default());
    }

    #[test]
    fn test_resolve_paths() {
        let root = Path::new("/srv/idiom2vec");
        let paths = Config::default().resolve_paths(root);
        assert_eq!(paths.slide_tsv, root.join("data/slide.tsv"));
        assert_eq!(paths.idiom_matcher, root.join("data/idiom_matcher.bin"));
        assert!(paths.lemma_table.is_none());
    }
}
