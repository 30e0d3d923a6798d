//! Idiom pattern matcher
//!
//! Idioms are compiled into a trie over token lemmas. Matching scans a
//! document left to right and takes the longest idiom starting at each
//! position, so returned spans never overlap.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{IdiomError, IdiomResult};
use crate::nlp::{Doc, Pipeline};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TrieNode {
    children: HashMap<String, TrieNode>,
    /// Index into `IdiomMatcher::idioms` when a pattern ends here
    idiom: Option<usize>,
}

/// A matched idiom span `[start, end)` in token positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdiomMatch {
    pub id: usize,
    pub start: usize,
    pub end: usize,
}

impl IdiomMatch {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdiomMatcher {
    root: TrieNode,
    /// Canonical idiom strings, indexed by match id
    idioms: Vec<String>,
}

impl IdiomMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile idiom strings into lemma patterns. Each idiom runs through
    /// `pipeline` so its pattern uses the same tokens and lemmas as the
    /// documents it will be matched against.
    pub fn from_idioms<I, S>(idioms: I, pipeline: &Pipeline) -> IdiomResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = Self::new();
        for idiom in idioms {
            let idiom = idiom.as_ref();
            let doc = pipeline.process(&idiom.to_lowercase())?;
            let pattern: Vec<String> = doc.lemmas().into_iter().map(String::from).collect();
            if !matcher.add(idiom, &pattern) {
                tracing::debug!(idiom, "Skipping duplicate idiom pattern");
            }
        }
        Ok(matcher)
    }

    /// Register `pattern` for `idiom`. Returns false when the pattern is
    /// empty or already registered; the first registration wins.
    pub fn add<S: AsRef<str>>(&mut self, idiom: &str, pattern: &[S]) -> bool {
        if pattern.is_empty() {
            return false;
        }

        let mut node = &mut self.root;
        for word in pattern {
            node = node.children.entry(word.as_ref().to_string()).or_default();
        }
        if node.idiom.is_some() {
            return false;
        }

        node.idiom = Some(self.idioms.len());
        self.idioms.push(idiom.to_string());
        true
    }

    /// Number of registered idioms
    pub fn len(&self) -> usize {
        self.idioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idioms.is_empty()
    }

    /// Canonical idiom string for a match id
    pub fn idiom(&self, id: usize) -> Option<&str> {
        self.idioms.get(id).map(|s| s.as_str())
    }

    pub fn idioms(&self) -> &[String] {
        &self.idioms
    }

    /// Longest idiom starting at `start`, as `(id, end)`
    fn longest_at(&self, keys: &[&str], start: usize) -> Option<(usize, usize)> {
        let mut node = &self.root;
        let mut best = None;
        for (offset, key) in keys[start..].iter().enumerate() {
            match node.children.get(*key) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(id) = node.idiom {
                best = Some((id, start + offset + 1));
            }
        }
        best
    }

    /// Non-overlapping leftmost-longest matches over token lemmas
    pub fn find_matches(&self, doc: &Doc) -> Vec<IdiomMatch> {
        let keys: Vec<&str> = doc.lemmas();
        let mut matches = Vec::new();
        let mut start = 0;

        while start < keys.len() {
            match self.longest_at(&keys, start) {
                Some((id, end)) => {
                    matches.push(IdiomMatch { id, start, end });
                    start = end;
                }
                None => start += 1,
            }
        }

        matches
    }

    /// Load a matcher artifact written by [`IdiomMatcher::save`]
    pub fn load(path: &Path) -> IdiomResult<Self> {
        if !path.exists() {
            return Err(IdiomError::MatcherNotFound(path.to_path_buf()));
        }
        let bytes = fs::read(path).map_err(|err| IdiomError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        let matcher: Self = bincode::deserialize(&bytes).map_err(|err| IdiomError::Artifact {
            path: path.to_path_buf(),
            err,
        })?;
        tracing::info!(
            idioms = matcher.len(),
            path = %path.display(),
            "Loaded idiom matcher"
        );
        Ok(matcher)
    }

    pub fn save(&self, path: &Path) -> IdiomResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| IdiomError::Io {
                path: parent.to_path_buf(),
                err,
            })?;
        }
        let bytes = bincode::serialize(self).map_err(|err| IdiomError::Artifact {
            path: path.to_path_buf(),
            err,
        })?;
        fs::write(path, bytes).map_err(|err| IdiomError::Io {
            path: path.to_path_buf(),
            err,
        })
    }
}
