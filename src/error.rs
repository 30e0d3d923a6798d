//! Error types for the idiom pipeline and the embedding trainer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the idiom filter, matcher and pipeline.
#[derive(Error, Debug)]
pub enum IdiomError {
    /// The serialized matcher artifact does not exist
    #[error("Idiom matcher not found: {}", .0.display())]
    MatcherNotFound(PathBuf),

    /// The merge stage was constructed without a usable matcher
    #[error("idiom_matcher does not exist.")]
    MissingMatcher,

    /// A stage was positioned relative to a stage the pipeline does not have
    #[error("Unknown pipeline stage: {0}")]
    UnknownStage(String),

    /// A stage with the same name is already part of the pipeline
    #[error("Duplicate pipeline stage: {0}")]
    DuplicateStage(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// bincode (de)serialization of an artifact failed
    #[error("Artifact error for {path}: {err}")]
    Artifact {
        path: PathBuf,
        #[source]
        err: bincode::Error,
    },

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// A tab-separated table row could not be read
    #[error("Table error in {path}: {err}")]
    Csv {
        path: PathBuf,
        #[source]
        err: csv::Error,
    },
}

/// Errors raised while training or persisting embedding models.
#[derive(Error, Debug)]
pub enum TrainError {
    /// No word survived the `min_count` pruning
    #[error("Vocabulary is empty (min_count = {min_count})")]
    EmptyVocabulary { min_count: usize },

    #[error("Invalid training parameters: {0}")]
    InvalidParams(String),

    /// A corpus record could not be read or parsed
    #[error("Corpus error in {path} at line {line}: {message}")]
    Corpus {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Word not in vocabulary: {0}")]
    WordNotFound(String),

    #[error("Artifact error for {path}: {err}")]
    Artifact {
        path: PathBuf,
        #[source]
        err: bincode::Error,
    },

    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type IdiomResult<T> = std::result::Result<T, IdiomError>;
pub type TrainResult<T> = std::result::Result<T, TrainError>;
