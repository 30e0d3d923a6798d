//! Vectors-only export of a trained model

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{TrainError, TrainResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyedVectors {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Array2<f32>,
}

impl KeyedVectors {
    /// `vectors` holds one row per word, in the order of `words`
    pub fn new(words: Vec<String>, vectors: Array2<f32>) -> TrainResult<Self> {
        if words.len() != vectors.nrows() {
            return Err(TrainError::InvalidParams(format!(
                "{} words but {} vectors",
                words.len(),
                vectors.nrows()
            )));
        }
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i))
            .collect();
        Ok(Self {
            words,
            index,
            vectors,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn vector_size(&self) -> usize {
        self.vectors.ncols()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn get_vector(&self, word: &str) -> TrainResult<ArrayView1<'_, f32>> {
        let idx = self
            .index
            .get(word)
            .ok_or_else(|| TrainError::WordNotFound(word.to_string()))?;
        Ok(self.vectors.row(*idx))
    }

    /// Cosine similarity between two words
    pub fn similarity(&self, a: &str, b: &str) -> TrainResult<f32> {
        let va = self.get_vector(a)?;
        let vb = self.get_vector(b)?;
        Ok(cosine(va, vb))
    }

    /// The `topn` words closest to `word` by cosine similarity, excluding
    /// the word itself
    pub fn most_similar(&self, word: &str, topn: usize) -> TrainResult<Vec<(String, f32)>> {
        let target = self.get_vector(word)?;
        let norms: Array1<f32> = self
            .vectors
            .map_axis(Axis(1), |row| row.dot(&row).sqrt());
        let target_norm = target.dot(&target).sqrt();

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .dot(&target)
            .iter()
            .enumerate()
            .filter(|(i, _)| self.words[*i] != word)
            .map(|(i, &d)| {
                let denom = norms[i] * target_norm;
                (i, if denom > 0.0 { d / denom } else { 0.0 })
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored
            .into_iter()
            .take(topn)
            .map(|(i, s)| (self.words[i].clone(), s))
            .collect())
    }

    pub fn save(&self, path: &Path) -> TrainResult<()> {
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
        bincode::serialize_into(BufWriter::new(file), self).map_err(|err| {
            TrainError::Artifact {
                path: path.to_path_buf(),
                err,
            }
        })?;
        tracing::info!(path = %path.display(), words = self.len(), "Saved keyed vectors");
        Ok(())
    }

    pub fn load(path: &Path) -> TrainResult<Self> {
        let file = File::open(path).map_err(|err| TrainError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        bincode::deserialize_from(BufReader::new(file)).map_err(|err| TrainError::Artifact {
            path: path.to_path_buf(),
            err,
        })
    }
}

fn cosine(a: ArrayView1<'_, f32>, b: ArrayView1<'_, f32>) -> f32 {
    let denom = a.dot(&a).sqrt() * b.dot(&b).sqrt();
    if denom > 0.0 {
        a.dot(&b) / denom
    } else {
        0.0
    }
}
