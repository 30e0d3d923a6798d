//! Vocabulary scan and sampling tables

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::corpus::Corpus;
use crate::error::{TrainError, TrainResult};

/// Integer domain of the negative-sampling table
const CUM_TABLE_DOMAIN: f64 = 2_147_483_647.0;
/// Unigram distribution smoothing exponent
const NS_EXPONENT: f64 = 0.75;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocab {
    /// Words sorted by descending count
    words: Vec<String>,
    counts: Vec<u64>,
    index: HashMap<String, usize>,
    /// Raw words seen during the scan, including pruned ones
    total_words: u64,
    total_sequences: u64,
}

impl Vocab {
    /// Count every word of the corpus and keep those seen `min_count` times
    pub fn scan(corpus: &dyn Corpus, min_count: usize) -> TrainResult<Self> {
        let mut raw: HashMap<String, u64> = HashMap::new();
        let mut total_words = 0u64;
        let mut total_sequences = 0u64;

        for sequence in corpus.sequences()? {
            let sequence = sequence?;
            total_sequences += 1;
            total_words += sequence.len() as u64;
            for word in sequence {
                *raw.entry(word).or_insert(0) += 1;
            }
        }

        let vocab = Self::from_counts(raw, min_count, total_words, total_sequences);
        if vocab.is_empty() {
            return Err(TrainError::EmptyVocabulary { min_count });
        }

        tracing::info!(
            unique = vocab.len(),
            total_words,
            sequences = total_sequences,
            min_count,
            "Collected vocabulary"
        );
        Ok(vocab)
    }

    fn from_counts(
        raw: HashMap<String, u64>,
        min_count: usize,
        total_words: u64,
        total_sequences: u64,
    ) -> Self {
        let mut kept: Vec<(String, u64)> = raw
            .into_iter()
            .filter(|(_, count)| *count >= min_count as u64)
            .collect();
        // ties broken alphabetically so the layout is reproducible
        kept.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut vocab = Self {
            total_words,
            total_sequences,
            ..Self::default()
        };
        for (idx, (word, count)) in kept.into_iter().enumerate() {
            vocab.index.insert(word.clone(), idx);
            vocab.words.push(word);
            vocab.counts.push(count);
        }
        vocab
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn word(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(|w| w.as_str())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn count(&self, idx: usize) -> u64 {
        self.counts.get(idx).copied().unwrap_or(0)
    }

    pub fn total_words(&self) -> u64 {
        self.total_words
    }

    pub fn total_sequences(&self) -> u64 {
        self.total_sequences
    }

    /// Sum of counts over retained words
    pub fn retained_words(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Probability of keeping each word under frequent-word downsampling
    pub fn keep_probabilities(&self, sample: f64) -> Vec<f32> {
        if sample <= 0.0 {
            return vec![1.0; self.len()];
        }
        let threshold = sample * self.retained_words() as f64;
        self.counts
            .iter()
            .map(|&count| {
                let v = count as f64;
                (((v / threshold).sqrt() + 1.0) * (threshold / v)).min(1.0) as f32
            })
            .collect()
    }

    /// Cumulative unigram^0.75 table for negative sampling
    pub fn cum_table(&self) -> Vec<u32> {
        let pow_total: f64 = self
            .counts
            .iter()
            .map(|&c| (c as f64).powf(NS_EXPONENT))
            .sum();

        let mut cumulative = 0.0;
        self.counts
            .iter()
            .map(|&c| {
                cumulative += (c as f64).powf(NS_EXPONENT);
                (cumulative / pow_total * CUM_TABLE_DOMAIN).round() as u32
            })
            .collect()
    }
}

/// Draw a word index from a cumulative table given a uniform `r` in
/// `[0, table.last())`
pub fn draw_from_cum_table(table: &[u32], r: u32) -> usize {
    table
        .partition_point(|&x| x <= r)
        .min(table.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Vec<String>> {
        vec![
            vec!["a", "b", "a", "c"],
            vec!["a", "b", "kick the bucket"],
            vec!["d"],
        ]
        .into_iter()
        .map(|s| s.into_iter().map(String::from).collect())
        .collect()
    }

    #[test]
    fn test_scan_orders_by_count() {
        let vocab = Vocab::scan(&corpus(), 1).unwrap();
        assert_eq!(vocab.len(), 5);
        assert_eq!(vocab.word(0), Some("a"));
        assert_eq!(vocab.word(1), Some("b"));
        assert_eq!(vocab.count(0), 3);
        assert_eq!(vocab.total_words(), 8);
        assert_eq!(vocab.total_sequences(), 3);
        assert!(vocab.get("kick the bucket").is_some());
    }

    #[test]
    fn test_min_count_prunes() {
        let vocab = Vocab::scan(&corpus(), 2).unwrap();
        assert_eq!(vocab.words(), &["a".to_string(), "b".to_string()]);
        assert_eq!(vocab.retained_words(), 5);
        // raw total still counts pruned words
        assert_eq!(vocab.total_words(), 8);
    }

    #[test]
    fn test_empty_vocabulary() {
        let result = Vocab::scan(&corpus(), 10);
        assert!(matches!(
            result,
            Err(TrainError::EmptyVocabulary { min_count: 10 })
        ));
    }

    #[test]
    fn test_keep_probabilities() {
        let vocab = Vocab::scan(&corpus(), 1).unwrap();
        assert!(vocab.keep_probabilities(0.0).iter().all(|&p| p == 1.0));

        let probs = vocab.keep_probabilities(0.01);
        // the most frequent word is downsampled hardest
        assert!(probs[0] < probs[4]);
        assert!(probs.iter().all(|&p| p > 0.0 && p <= 1.0));
    }

    #[test]
    fn test_cum_table() {
        let vocab = Vocab::scan(&corpus(), 1).unwrap();
        let table = vocab.cum_table();
        assert_eq!(table.len(), vocab.len());
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*table.last().unwrap(), CUM_TABLE_DOMAIN as u32);

        assert_eq!(draw_from_cum_table(&table, 0), 0);
        assert_eq!(draw_from_cum_table(&table, table[0]), 1);
        assert_eq!(draw_from_cum_table(&table, u32::MAX), vocab.len() - 1);
    }
}
