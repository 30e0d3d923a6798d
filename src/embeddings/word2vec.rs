//! Word2Vec trainer
//!
//! Skip-gram and CBOW with negative sampling. Each epoch streams the corpus
//! in batches of roughly `batch_words` words; the sequences of a batch are
//! trained in parallel on a dedicated rayon pool against shared weights.

use ndarray::{Array2, ArrayView1};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::Instant;

use crate::corpus::Corpus;
use crate::error::{TrainError, TrainResult};

use super::callback::{EpochCallback, EpochReport};
use super::keyed_vectors::KeyedVectors;
use super::params::{Architecture, Word2VecParams};
use super::shared::SharedMatrix;
use super::vocab::{draw_from_cum_table, Vocab};

/// Dot products are clamped to this range before the sigmoid
const MAX_EXP: f32 = 6.0;
/// Longer sequences are split into chunks of this many words
const MAX_SEQUENCE_LEN: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word2Vec {
    params: Word2VecParams,
    vocab: Vocab,
    /// Input (word) vectors, one row per vocabulary entry
    vectors: Array2<f32>,
    /// Output weights for negative sampling
    syn1neg: Array2<f32>,
    /// Cumulative loss over the whole run
    training_loss: f64,
}

impl Word2Vec {
    /// Build the vocabulary from `corpus` and train for `params.epochs`
    /// passes. Callbacks run on the calling thread between epochs.
    pub fn train(
        params: Word2VecParams,
        corpus: &dyn Corpus,
        callbacks: &mut [&mut dyn EpochCallback],
    ) -> TrainResult<Self> {
        params.validate()?;
        let vocab = Vocab::scan(corpus, params.min_count)?;

        let size = params.vector_size;
        let mut init_rng = SmallRng::seed_from_u64(params.seed);
        let syn0 = SharedMatrix::from_fn(vocab.len(), size, |_, _| {
            (init_rng.gen::<f32>() - 0.5) / size as f32
        });
        let syn1neg = SharedMatrix::zeros(vocab.len(), size);

        let keep = vocab.keep_probabilities(params.sample);
        let cum_table = vocab.cum_table();
        let ctx = TrainContext {
            params: &params,
            syn0: &syn0,
            syn1neg: &syn1neg,
            keep: &keep,
            cum_table: &cum_table,
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(params.workers)
            .thread_name(|i| format!("word2vec-{}", i))
            .build()
            .map_err(|e| TrainError::InvalidParams(e.to_string()))?;

        tracing::info!(
            architecture = params.architecture.name(),
            vector_size = size,
            window = params.window,
            negative = params.negative,
            workers = params.workers,
            epochs = params.epochs,
            "Training word2vec"
        );

        for cb in callbacks.iter_mut() {
            cb.on_train_begin(params.epochs);
        }

        let total_effort = vocab.total_words().max(1) * params.epochs as u64;
        let mut alpha = params.alpha;
        let mut training_loss = 0.0;

        for epoch in 0..params.epochs {
            let started = Instant::now();
            let epoch_base = epoch as u64 * vocab.total_words();
            let mut raw_words = 0u64;
            let mut raw_flushed = 0u64;
            let mut effective_words = 0u64;
            let mut batch: Vec<Vec<usize>> = Vec::new();
            let mut batch_len = 0usize;
            let mut batch_no = 0u64;

            let flush = |batch: &mut Vec<Vec<usize>>, done: u64, batch_no: u64| {
                let alpha = decayed_alpha(&params, epoch_base + done, total_effort);
                let seed = BatchSeed {
                    seed: params.seed,
                    epoch: epoch as u64,
                    batch: batch_no,
                };
                let stats = run_batch(&pool, &ctx, batch, alpha, seed);
                batch.clear();
                (alpha, stats)
            };

            for sequence in corpus.sequences()? {
                let sequence = sequence?;
                raw_words += sequence.len() as u64;

                let indices: Vec<usize> = sequence.iter().filter_map(|w| vocab.get(w)).collect();
                for chunk in indices.chunks(MAX_SEQUENCE_LEN) {
                    batch_len += chunk.len();
                    batch.push(chunk.to_vec());
                }

                if batch_len >= params.batch_words {
                    let (a, stats) = flush(&mut batch, raw_flushed, batch_no);
                    alpha = a;
                    effective_words += stats.effective_words;
                    training_loss += stats.loss;
                    raw_flushed = raw_words;
                    batch_len = 0;
                    batch_no += 1;
                }
            }
            if !batch.is_empty() {
                let (a, stats) = flush(&mut batch, raw_flushed, batch_no);
                alpha = a;
                effective_words += stats.effective_words;
                training_loss += stats.loss;
            }

            let report = EpochReport {
                epoch,
                epochs: params.epochs,
                latest_training_loss: if params.compute_loss { training_loss } else { 0.0 },
                words_processed: raw_words,
                effective_words,
                alpha,
                elapsed: started.elapsed(),
            };
            for cb in callbacks.iter_mut() {
                cb.on_epoch_end(&report);
            }
        }

        for cb in callbacks.iter_mut() {
            cb.on_train_end();
        }

        Ok(Self {
            vectors: syn0.into_array(),
            syn1neg: syn1neg.into_array(),
            training_loss: if params.compute_loss { training_loss } else { 0.0 },
            params,
            vocab,
        })
    }

    pub fn params(&self) -> &Word2VecParams {
        &self.params
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    pub fn vectors(&self) -> &Array2<f32> {
        &self.vectors
    }

    pub fn training_loss(&self) -> f64 {
        self.training_loss
    }

    pub fn get_vector(&self, word: &str) -> TrainResult<ArrayView1<'_, f32>> {
        let idx = self
            .vocab
            .get(word)
            .ok_or_else(|| TrainError::WordNotFound(word.to_string()))?;
        Ok(self.vectors.row(idx))
    }

    /// Export the input vectors without the training state
    pub fn keyed_vectors(&self) -> TrainResult<KeyedVectors> {
        KeyedVectors::new(self.vocab.words().to_vec(), self.vectors.clone())
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
        tracing::info!(path = %path.display(), words = self.vocab.len(), "Saved word2vec model");
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

/// Linear decay from `alpha` to `min_alpha` over the whole run
fn decayed_alpha(params: &Word2VecParams, done: u64, total: u64) -> f32 {
    let progress = (done as f64 / total as f64).min(1.0) as f32;
    (params.alpha - (params.alpha - params.min_alpha) * progress).max(params.min_alpha)
}

#[derive(Debug, Clone, Copy)]
struct BatchSeed {
    seed: u64,
    epoch: u64,
    batch: u64,
}

impl BatchSeed {
    fn for_sequence(&self, index: usize) -> u64 {
        let mut h = self.seed ^ 0x9E37_79B9_7F4A_7C15;
        for v in [self.epoch, self.batch, index as u64] {
            h = (h ^ v).wrapping_mul(0x0000_0100_0000_01B3);
            h ^= h >> 29;
        }
        h
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct BatchStats {
    effective_words: u64,
    loss: f64,
}

impl BatchStats {
    fn merge(self, other: Self) -> Self {
        Self {
            effective_words: self.effective_words + other.effective_words,
            loss: self.loss + other.loss,
        }
    }
}

fn run_batch(
    pool: &ThreadPool,
    ctx: &TrainContext<'_>,
    batch: &[Vec<usize>],
    alpha: f32,
    seed: BatchSeed,
) -> BatchStats {
    pool.install(|| {
        batch
            .par_iter()
            .enumerate()
            .map(|(i, sequence)| {
                let mut rng = SmallRng::seed_from_u64(seed.for_sequence(i));
                ctx.train_sequence(sequence, alpha, &mut rng)
            })
            .reduce(BatchStats::default, BatchStats::merge)
    })
}

struct TrainContext<'a> {
    params: &'a Word2VecParams,
    syn0: &'a SharedMatrix,
    syn1neg: &'a SharedMatrix,
    keep: &'a [f32],
    cum_table: &'a [u32],
}

impl TrainContext<'_> {
    fn train_sequence(&self, sequence: &[usize], alpha: f32, rng: &mut SmallRng) -> BatchStats {
        let sentence: Vec<usize> = sequence
            .iter()
            .copied()
            .filter(|&w| self.keep[w] >= 1.0 || self.keep[w] > rng.gen::<f32>())
            .collect();

        let size = self.syn0.cols();
        let mut l1 = vec![0.0f32; size];
        let mut neu1e = vec![0.0f32; size];
        let mut loss = 0.0;
        let window = self.params.window;

        for pos in 0..sentence.len() {
            let span = window - rng.gen_range(0..window);
            let start = pos.saturating_sub(span);
            let end = (pos + span + 1).min(sentence.len());
            let target = sentence[pos];

            match self.params.architecture {
                Architecture::SkipGram => {
                    for c in (start..end).filter(|&c| c != pos) {
                        let input = sentence[c];
                        self.syn0.read_row(input, &mut l1);
                        neu1e.fill(0.0);
                        loss += self.negative_step(&l1, target, alpha, rng, &mut neu1e);
                        self.syn0.add_to_row(input, &neu1e, 1.0);
                    }
                }
                Architecture::Cbow => {
                    l1.fill(0.0);
                    let mut count = 0usize;
                    for c in (start..end).filter(|&c| c != pos) {
                        self.syn0.accumulate_row(sentence[c], &mut l1, 1.0);
                        count += 1;
                    }
                    if count == 0 {
                        continue;
                    }
                    let inv = 1.0 / count as f32;
                    l1.iter_mut().for_each(|x| *x *= inv);

                    neu1e.fill(0.0);
                    loss += self.negative_step(&l1, target, alpha, rng, &mut neu1e);
                    for c in (start..end).filter(|&c| c != pos) {
                        self.syn0.add_to_row(sentence[c], &neu1e, 1.0);
                    }
                }
            }
        }

        BatchStats {
            effective_words: sentence.len() as u64,
            loss,
        }
    }

    /// One positive and `negative` noise updates for `l1` predicting
    /// `target`. Accumulates the input gradient into `neu1e` and returns
    /// the log loss of the step.
    fn negative_step(
        &self,
        l1: &[f32],
        target: usize,
        alpha: f32,
        rng: &mut SmallRng,
        neu1e: &mut [f32],
    ) -> f64 {
        let bound = self.cum_table.last().copied().unwrap_or(0).max(1);
        let mut loss = 0.0;

        for d in 0..=self.params.negative {
            let (word, label) = if d == 0 {
                (target, 1.0)
            } else {
                let w = draw_from_cum_table(self.cum_table, rng.gen_range(0..bound));
                if w == target {
                    continue;
                }
                (w, 0.0)
            };

            let dot = self.syn1neg.dot(word, l1).clamp(-MAX_EXP, MAX_EXP);
            let g = (label - sigmoid(dot)) * alpha;
            if self.params.compute_loss {
                let signed = if d == 0 { dot } else { -dot };
                loss -= (sigmoid(signed) as f64).ln();
            }

            self.syn1neg.accumulate_row(word, neu1e, g);
            self.syn1neg.add_to_row(word, l1, g);
        }
        loss
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}
