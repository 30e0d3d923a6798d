//! Lookup-table lemmatizer
//!
//! Lemmas come from a `form<TAB>lemma` table. Forms missing from the table
//! lemmatize to their lowercased surface text.

use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::error::{IdiomError, IdiomResult};

use super::doc::Doc;
use super::pipeline::Stage;

pub const LEMMATIZER_STAGE: &str = "lemmatizer";

#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    table: HashMap<String, String>,
}

impl Lemmatizer {
    /// Lemmatizer with an empty table (lowercasing only)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, F, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        Self {
            table: entries
                .into_iter()
                .map(|(form, lemma)| (form.into().to_lowercase(), lemma.into()))
                .collect(),
        }
    }

    /// Load a tab-separated `form<TAB>lemma` table. Lines starting with `#`
    /// and rows with fewer than two fields are ignored.
    pub fn from_file(path: &Path) -> IdiomResult<Self> {
        let file = File::open(path).map_err(|err| IdiomError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| IdiomError::Csv {
                path: path.to_path_buf(),
                err,
            })?;
            if let (Some(form), Some(lemma)) = (record.get(0), record.get(1)) {
                if !form.is_empty() && !lemma.is_empty() {
                    entries.push((form.to_string(), lemma.to_string()));
                }
            }
        }

        let lemmatizer = Self::with_entries(entries);
        tracing::debug!(
            entries = lemmatizer.len(),
            path = %path.display(),
            "Loaded lemma table"
        );
        Ok(lemmatizer)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        match self.table.get(&lower) {
            Some(lemma) => lemma.clone(),
            None => lower,
        }
    }
}

impl Stage for Lemmatizer {
    fn name(&self) -> &str {
        LEMMATIZER_STAGE
    }

    fn process(&self, mut doc: Doc) -> IdiomResult<Doc> {
        for token in doc.tokens.iter_mut().filter(|t| t.lemma.is_none()) {
            token.lemma = Some(self.lemmatize(&token.text));
        }
        Ok(doc)
    }
}
