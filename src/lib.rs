//! idiom2vec
//!
//! Idiom-aware text preprocessing and word2vec training.
//!
//! - `idioms`: idiom selection, matching and the `merge_idiom` stage
//! - `nlp`: documents, tokenizer, lemmatizer and the ordered pipeline
//! - `corpus`: restartable NDJSON training corpora
//! - `embeddings`: the word2vec trainer, callbacks, loss history and keyed vectors
//! - `core`: project configuration and paths

pub mod core;
pub mod corpus;
pub mod embeddings;
pub mod error;
pub mod idioms;
pub mod nlp;

pub use error::{IdiomError, IdiomResult, TrainError, TrainResult};
