//! NDJSON corpus reader and writer
//!
//! Each line holds one document: `{"sents": [["tok", ...], ...]}`.
//! The reader is restartable: every call to `sequences` re-opens the file
//! and streams it from the top.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};

use crate::error::{TrainError, TrainResult};
use crate::nlp::Doc;

use super::{Corpus, Sequences};

/// One corpus line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    #[serde(default)]
    pub sents: Vec<Vec<String>>,
}

impl CorpusRecord {
    /// Build a record from a processed doc, keeping lemmas of word tokens
    /// and merged idioms. Punctuation-only tokens are dropped.
    pub fn from_doc(doc: &Doc) -> Self {
        let sents = doc
            .sentences()
            .into_iter()
            .map(|sent| {
                sent.iter()
                    .filter(|t| t.is_idiom() || t.text.chars().any(char::is_alphanumeric))
                    .map(|t| t.lemma_or_text().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|sent| !sent.is_empty())
            .collect();
        Self { sents }
    }
}

/// COCA-style corpus streamed from an NDJSON file
#[derive(Debug, Clone)]
pub struct Coca {
    path: PathBuf,
    doc_is_sent: bool,
}

impl Coca {
    /// With `doc_is_sent` every sentence is a training sequence, otherwise
    /// a whole document is.
    pub fn new(path: impl Into<PathBuf>, doc_is_sent: bool) -> Self {
        Self {
            path: path.into(),
            doc_is_sent,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Corpus for Coca {
    fn sequences(&self) -> TrainResult<Sequences<'_>> {
        let file = File::open(&self.path).map_err(|err| TrainError::Io {
            path: self.path.clone(),
            err,
        })?;
        Ok(Box::new(CocaIter {
            lines: BufReader::new(file).lines(),
            path: &self.path,
            line_no: 0,
            doc_is_sent: self.doc_is_sent,
            pending: VecDeque::new(),
        }))
    }
}

struct CocaIter<'a> {
    lines: Lines<BufReader<File>>,
    path: &'a Path,
    line_no: usize,
    doc_is_sent: bool,
    pending: VecDeque<Vec<String>>,
}

impl CocaIter<'_> {
    fn error(&self, message: String) -> TrainError {
        TrainError::Corpus {
            path: self.path.to_path_buf(),
            line: self.line_no,
            message,
        }
    }
}

impl Iterator for CocaIter<'_> {
    type Item = TrainResult<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(sequence) = self.pending.pop_front() {
                return Some(Ok(sequence));
            }

            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.line_no += 1;
                    return Some(Err(self.error(e.to_string())));
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            let record: CorpusRecord = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(e) => return Some(Err(self.error(e.to_string()))),
            };

            if self.doc_is_sent {
                self.pending
                    .extend(record.sents.into_iter().filter(|s| !s.is_empty()));
            } else {
                let doc: Vec<String> = record.sents.into_iter().flatten().collect();
                if !doc.is_empty() {
                    self.pending.push_back(doc);
                }
            }
        }
    }
}

/// Writes corpus records, one JSON object per line
pub struct CorpusWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    written: usize,
}

impl CorpusWriter {
    pub fn create(path: &Path) -> TrainResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| TrainError::Io {
                path: parent.to_path_buf(),
                err,
            })?;
        }
        let file = File::create(path).map_err(|err| TrainError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write(&mut self, record: &CorpusRecord) -> TrainResult<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", line).map_err(|err| TrainError::Io {
            path: self.path.clone(),
            err,
        })?;
        self.written += 1;
        Ok(())
    }

    pub fn finish(mut self) -> TrainResult<usize> {
        self.writer.flush().map_err(|err| TrainError::Io {
            path: self.path.clone(),
            err,
        })?;
        Ok(self.written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Token, IDIOM_TAG};
    use tempfile::TempDir;

    fn write_corpus(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("coca_spok_train.ndjson");
        let content = concat!(
            r#"{"sents": [["we", "kick the bucket"], ["then", "leave"]]}"#,
            "\n",
            "\n",
            r#"{"sents": [["only", "one"]]}"#,
            "\n",
        );
        std::fs::write(&path, content).unwrap();
        path
    }

    fn collect(corpus: &impl Corpus) -> Vec<Vec<String>> {
        corpus
            .sequences()
            .unwrap()
            .collect::<TrainResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_doc_is_sent() {
        let dir = TempDir::new().unwrap();
        let coca = Coca::new(write_corpus(&dir), true);

        let sequences = collect(&coca);
        assert_eq!(sequences.len(), 3);
        assert_eq!(sequences[0], vec!["we", "kick the bucket"]);
        assert_eq!(sequences[2], vec!["only", "one"]);
    }

    #[test]
    fn test_doc_is_article() {
        let dir = TempDir::new().unwrap();
        let coca = Coca::new(write_corpus(&dir), false);

        let sequences = collect(&coca);
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0], vec!["we", "kick the bucket", "then", "leave"]);
    }

    #[test]
    fn test_restartable() {
        let dir = TempDir::new().unwrap();
        let coca = Coca::new(write_corpus(&dir), true);
        assert_eq!(collect(&coca), collect(&coca));
    }

    #[test]
    fn test_malformed_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ndjson");
        std::fs::write(&path, "{\"sents\": [[\"ok\"]]}\nnot json\n").unwrap();

        let results: Vec<_> = Coca::new(&path, true).sequences().unwrap().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(TrainError::Corpus { line: 2, .. })));
    }

    #[test]
    fn test_missing_file() {
        let coca = Coca::new("/nonexistent/corpus.ndjson", true);
        assert!(matches!(coca.sequences(), Err(TrainError::Io { .. })));
    }

    #[test]
    fn test_writer_round_trip() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("out/corpus.ndjson");

        let mut idiom = Token::new("kicked the bucket");
        idiom.lemma = Some("kick the bucket".to_string());
        idiom.tag = Some(IDIOM_TAG.to_string());
        let doc = Doc::new(vec![
            Token::new("he"),
            idiom,
            Token::new("."),
            Token::new("sad"),
        ]);

        let mut writer = CorpusWriter::create(&path)?;
        writer.write(&CorpusRecord::from_doc(&doc))?;
        assert_eq!(writer.finish()?, 1);

        let sequences = collect(&Coca::new(&path, true));
        assert_eq!(
            sequences,
            vec![vec!["he".to_string(), "kick the bucket".to_string()], vec!["sad".to_string()]]
        );
        Ok(())
    }
}
