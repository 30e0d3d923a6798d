//! Word tokenizer built on the `tokenizers` whitespace pre-tokenizer
//!
//! Splits on whitespace and separates punctuation runs from word characters
//! (`\w+|[^\w\s]+`), so "well-known" becomes `well`, `-`, `known`.

use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::error::{IdiomError, IdiomResult};

use super::doc::{Doc, Token};

pub struct WhitespaceTokenizer {
    inner: Whitespace,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self {
            inner: Whitespace::default(),
        }
    }

    /// Split text into `(word, byte offsets)` pairs
    fn split(&self, text: &str) -> IdiomResult<Vec<(String, (usize, usize))>> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.inner
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| IdiomError::Tokenizer(e.to_string()))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(word, offsets, _)| (word.to_string(), offsets))
            .collect())
    }

    /// Tokenize text into plain words
    pub fn words(&self, text: &str) -> IdiomResult<Vec<String>> {
        Ok(self.split(text)?.into_iter().map(|(w, _)| w).collect())
    }

    /// Tokenize text into an unannotated document
    pub fn tokenize(&self, text: &str) -> IdiomResult<Doc> {
        let splits = self.split(text)?;
        let mut tokens = Vec::with_capacity(splits.len());

        for (i, (word, (_, end))) in splits.iter().enumerate() {
            let ws = match splits.get(i + 1) {
                Some((_, (next_start, _))) => *next_start > *end,
                None => text.len() > *end,
            };
            let mut token = Token::new(word.clone());
            token.ws = ws;
            tokens.push(token);
        }

        Ok(Doc::new(tokens))
    }
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        let tokenizer = WhitespaceTokenizer::new();
        let words = tokenizer.words("he kicked the bucket.").unwrap();
        assert_eq!(words, vec!["he", "kicked", "the", "bucket", "."]);
    }

    #[test]
    fn test_hyphen_split() {
        let tokenizer = WhitespaceTokenizer::new();
        let words = tokenizer.words("a well-known fact").unwrap();
        assert_eq!(words, vec!["a", "well", "-", "known", "fact"]);
    }

    #[test]
    fn test_trailing_whitespace() {
        let tokenizer = WhitespaceTokenizer::new();
        let doc = tokenizer.tokenize("well-known fact").unwrap();
        let ws: Vec<bool> = doc.tokens.iter().map(|t| t.ws).collect();
        assert_eq!(ws, vec![false, false, true, false]);
    }

    #[test]
    fn test_empty_text() {
        let tokenizer = WhitespaceTokenizer::new();
        assert!(tokenizer.tokenize("   ").unwrap().is_empty());
    }
}
