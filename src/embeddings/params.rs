//! Word2Vec hyperparameters

use serde::{Deserialize, Serialize};

use crate::error::{TrainError, TrainResult};

/// Training objective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Architecture {
    /// Predict context words from the centre word
    SkipGram,
    /// Predict the centre word from the averaged context
    Cbow,
}

impl Architecture {
    /// `1` selects skip-gram, anything else CBOW
    pub fn from_sg(sg: u8) -> Self {
        if sg == 1 {
            Architecture::SkipGram
        } else {
            Architecture::Cbow
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Architecture::SkipGram => "skip-gram",
            Architecture::Cbow => "cbow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word2VecParams {
    pub vector_size: usize,
    /// Maximum distance between the centre word and a context word
    pub window: usize,
    pub min_count: usize,
    pub workers: usize,
    pub architecture: Architecture,
    pub epochs: usize,
    pub compute_loss: bool,
    /// Noise words drawn per positive example
    pub negative: usize,
    /// Downsampling threshold for frequent words, 0 disables it
    pub sample: f64,
    pub alpha: f32,
    pub min_alpha: f32,
    pub seed: u64,
    /// Target number of words per parallel batch
    pub batch_words: usize,
}

impl Default for Word2VecParams {
    fn default() -> Self {
        Self {
            vector_size: 100,
            window: 10,
            min_count: 1,
            workers: 4,
            architecture: Architecture::SkipGram,
            epochs: 50,
            compute_loss: false,
            negative: 5,
            sample: 1e-3,
            alpha: 0.025,
            min_alpha: 0.0001,
            seed: 1,
            batch_words: 10_000,
        }
    }
}

impl Word2VecParams {
    pub fn validate(&self) -> TrainResult<()> {
        let fail = |msg: &str| -> TrainResult<()> { Err(TrainError::InvalidParams(msg.to_string())) };

        if self.vector_size == 0 {
            return fail("vector_size must be positive");
        }
        if self.window == 0 {
            return fail("window must be positive");
        }
        if self.workers == 0 {
            return fail("workers must be positive");
        }
        if self.epochs == 0 {
            return fail("epochs must be positive");
        }
        if self.negative == 0 {
            return fail("negative must be positive");
        }
        if self.batch_words == 0 {
            return fail("batch_words must be positive");
        }
        if !(self.sample >= 0.0) {
            return fail("sample must be non-negative");
        }
        if !(self.alpha > 0.0) || !(self.min_alpha >= 0.0) || self.min_alpha > self.alpha {
            return fail("expected 0 <= min_alpha <= alpha and alpha > 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = Word2VecParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.window, 10);
        assert_eq!(params.architecture, Architecture::SkipGram);
    }

    #[test]
    fn test_from_sg() {
        assert_eq!(Architecture::from_sg(1), Architecture::SkipGram);
        assert_eq!(Architecture::from_sg(0), Architecture::Cbow);
    }

    #[test]
    fn test_invalid_params() {
        let params = Word2VecParams {
            window: 0,
            ..Word2VecParams::default()
        };
        assert!(matches!(params.validate(), Err(TrainError::InvalidParams(_))));

        let params = Word2VecParams {
            min_alpha: 0.5,
            ..Word2VecParams::default()
        };
        assert!(params.validate().is_err());
    }
}
