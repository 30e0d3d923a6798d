//! Word embedding training
//!
//! `Word2Vec::train` builds a vocabulary from a [`Corpus`](crate::corpus::Corpus),
//! trains skip-gram or CBOW vectors with negative sampling and reports each
//! epoch to the attached [`EpochCallback`]s.

pub mod callback;
pub mod keyed_vectors;
pub mod loss;
pub mod params;
mod shared;
pub mod vocab;
pub mod word2vec;

pub use callback::{EpochCallback, EpochReport, LossRecorder, ProgressLogger};
pub use keyed_vectors::KeyedVectors;
pub use loss::LossHistory;
pub use params::{Architecture, Word2VecParams};
pub use vocab::Vocab;
pub use word2vec::Word2Vec;
