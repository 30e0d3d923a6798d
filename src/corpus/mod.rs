//! Training corpora
//!
//! A corpus is a restartable sequence of token sequences. The trainer walks
//! it once to build the vocabulary and once per epoch.

pub mod coca;

pub use coca::{Coca, CorpusRecord, CorpusWriter};

use crate::error::TrainResult;

pub type Sequences<'a> = Box<dyn Iterator<Item = TrainResult<Vec<String>>> + 'a>;

pub trait Corpus {
    /// Start a fresh pass over the corpus
    fn sequences(&self) -> TrainResult<Sequences<'_>>;
}

/// In-memory corpus
impl Corpus for Vec<Vec<String>> {
    fn sequences(&self) -> TrainResult<Sequences<'_>> {
        Ok(Box::new(self.iter().cloned().map(Ok)))
    }
}
