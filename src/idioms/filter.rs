//! Idiom selection heuristics
//!
//! Decides which reference idioms make it into the active idiom vocabulary.
//! An idiom is a target when it is not excluded and it is either long
//! enough (in words or characters) or hyphenated. Exclusion always wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Thresholds and exclusions for idiom selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_min_word_count", rename = "minWordCount")]
    pub min_word_count: usize,

    #[serde(default = "default_min_length", rename = "minLength")]
    pub min_length: usize,

    /// Word delimiter inside an idiom string
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Idioms that never enter the vocabulary
    #[serde(default = "default_exceptions")]
    pub exceptions: Vec<String>,
}

fn default_min_word_count() -> usize {
    3
}

fn default_min_length() -> usize {
    14
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_exceptions() -> Vec<String> {
    // duplicate of "if need be"
    vec!["if needs be".to_string()]
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_word_count: default_min_word_count(),
            min_length: default_min_length(),
            separator: default_separator(),
            exceptions: default_exceptions(),
        }
    }
}

impl FilterConfig {
    pub fn exceptions_set(&self) -> HashSet<&str> {
        self.exceptions.iter().map(|e| e.as_str()).collect()
    }

    /// Word delimiter, falling back to a space when the configured one is empty
    pub fn separator(&self) -> &str {
        if self.separator.is_empty() {
            " "
        } else {
            &self.separator
        }
    }
}

pub fn is_above_min_len(idiom: &str, config: &FilterConfig) -> bool {
    idiom.chars().count() >= config.min_length
}

pub fn is_above_min_wc(idiom: &str, config: &FilterConfig) -> bool {
    idiom.split(config.separator()).count() >= config.min_word_count
}

pub fn is_hyphenated(idiom: &str) -> bool {
    idiom.contains('-')
}

pub fn is_not_exception(idiom: &str, config: &FilterConfig) -> bool {
    !config.exceptions.iter().any(|e| e == idiom)
}

/// Exclusion short-circuits the inclusion rules.
pub fn is_target(idiom: &str, config: &FilterConfig) -> bool {
    if !is_not_exception(idiom, config) {
        return false;
    }
    is_above_min_wc(idiom, config) || is_above_min_len(idiom, config) || is_hyphenated(idiom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_word_count() {
        let config = FilterConfig::default();
        assert!(is_above_min_wc("a b c", &config));
        assert!(!is_above_min_wc("a b", &config));
    }

    #[test]
    fn test_min_length() {
        let config = FilterConfig::default();
        let fourteen = "abcdefghijklmn";
        let thirteen = "abcdefghijklm";
        assert_eq!(fourteen.len(), 14);
        assert!(is_above_min_len(fourteen, &config));
        assert!(!is_above_min_len(thirteen, &config));
    }

    #[test]
    fn test_min_length_counts_chars() {
        let config = FilterConfig {
            min_length: 4,
            ..FilterConfig::default()
        };
        // 4 chars, 8 bytes
        assert!(is_above_min_len("éééé", &config));
        assert!(!is_above_min_len("ééé", &config));
    }

    #[test]
    fn test_hyphenated() {
        assert!(is_hyphenated("well-known"));
        assert!(!is_hyphenated("well known"));
    }

    #[test]
    fn test_exception_wins() {
        let config = FilterConfig::default();
        // three words and over 10 chars, still rejected
        assert!(is_above_min_wc("if needs be", &config));
        assert!(!is_target("if needs be", &config));
        assert!(is_target("if need be", &config));
    }

    #[test]
    fn test_exception_is_exact_match() {
        let config = FilterConfig::default();
        // substrings of an excluded idiom are not excluded
        assert!(is_not_exception("needs", &config));
        assert!(is_not_exception("if needs be it", &config));
    }

    #[test]
    fn test_exception_rejects_long_hyphenated() {
        let config = FilterConfig {
            exceptions: vec!["once-in-a-blue-moon".to_string()],
            ..FilterConfig::default()
        };
        assert!(!is_target("once-in-a-blue-moon", &config));
    }

    #[test]
    fn test_target_rules() {
        let config = FilterConfig::default();
        assert!(is_target("kick the bucket", &config));
        assert!(is_target("happy-go-lucky", &config));
        assert!(is_target("straightforward", &config));
        assert!(!is_target("at bay", &config));
        assert!(!is_target("go", &config));
    }

    #[test]
    fn test_custom_separator() {
        let config = FilterConfig {
            separator: "_".to_string(),
            ..FilterConfig::default()
        };
        assert!(is_above_min_wc("kick_the_bucket", &config));
        assert!(!is_above_min_wc("kick the bucket", &config));
    }

    #[test]
    fn test_empty_separator_splits_on_space() {
        let config = FilterConfig {
            separator: String::new(),
            ..FilterConfig::default()
        };
        assert!(!is_above_min_wc("a b", &config));
        assert!(is_above_min_wc("a b c", &config));
        assert!(!is_target("at bay", &config));
    }

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{"minLength": 10}"#;
        let config: FilterConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.min_length, 10);
        assert_eq!(config.min_word_count, 3);
        assert!(config.exceptions_set().contains("if needs be"));
    }
}
