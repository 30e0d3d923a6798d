//! Document and token types shared by all pipeline stages

use serde::{Deserialize, Serialize};

/// Tag assigned to tokens produced by an idiom merge
pub const IDIOM_TAG: &str = "IDIOM";

/// A single token with its optional annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Whether whitespace followed this token in the source text
    #[serde(default, skip_serializing)]
    pub ws: bool,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lemma: None,
            tag: None,
            ws: true,
        }
    }

    /// Lemma if one was assigned, surface text otherwise
    pub fn lemma_or_text(&self) -> &str {
        self.lemma.as_deref().unwrap_or(&self.text)
    }

    pub fn is_idiom(&self) -> bool {
        self.tag.as_deref() == Some(IDIOM_TAG)
    }

    /// Sentence-final punctuation
    pub fn is_sentence_end(&self) -> bool {
        matches!(self.text.as_str(), "." | "!" | "?" | "..." | "?!" | "!?")
    }
}

/// A tokenized unit of text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doc {
    pub tokens: Vec<Token>,
}

impl Doc {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Build a doc from pre-split words (no annotations)
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: words.into_iter().map(Token::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    pub fn lemmas(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.lemma_or_text()).collect()
    }

    /// Replace `tokens[start..end]` with a single token.
    ///
    /// The merged text keeps the source spacing between the span's tokens.
    pub fn merge_span(&mut self, start: usize, end: usize, lemma: &str, tag: &str) {
        if start >= end || end > self.tokens.len() {
            return;
        }
        let span = &self.tokens[start..end];
        let mut text = String::new();
        for (i, token) in span.iter().enumerate() {
            text.push_str(&token.text);
            if token.ws && i + 1 < span.len() {
                text.push(' ');
            }
        }
        let merged = Token {
            text,
            lemma: Some(lemma.to_string()),
            tag: Some(tag.to_string()),
            ws: span[span.len() - 1].ws,
        };
        self.tokens.splice(start..end, std::iter::once(merged));
    }

    /// Split into sentences on sentence-final punctuation.
    ///
    /// Punctuation tokens stay with the sentence they close.
    pub fn sentences(&self) -> Vec<&[Token]> {
        let mut sentences = Vec::new();
        let mut begin = 0;
        for (i, token) in self.tokens.iter().enumerate() {
            if token.is_sentence_end() {
                sentences.push(&self.tokens[begin..=i]);
                begin = i + 1;
            }
        }
        if begin < self.tokens.len() {
            sentences.push(&self.tokens[begin..]);
        }
        sentences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_span() {
        let mut doc = Doc::from_words(["he", "kicked", "the", "bucket", "today"]);
        doc.merge_span(1, 4, "kick the bucket", IDIOM_TAG);

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.tokens[1].text, "kicked the bucket");
        assert_eq!(doc.tokens[1].lemma.as_deref(), Some("kick the bucket"));
        assert!(doc.tokens[1].is_idiom());
        assert_eq!(doc.tokens[2].text, "today");
    }

    #[test]
    fn test_merge_span_keeps_spacing() {
        let mut first = Token::new("well");
        first.ws = false;
        let mut hyphen = Token::new("-");
        hyphen.ws = false;
        let mut doc = Doc::new(vec![first, hyphen, Token::new("known"), Token::new("fact")]);
        doc.merge_span(0, 3, "well-known", IDIOM_TAG);

        assert_eq!(doc.texts(), vec!["well-known", "fact"]);
        assert!(doc.tokens[0].ws);
    }

    #[test]
    fn test_merge_span_out_of_range() {
        let mut doc = Doc::from_words(["a", "b"]);
        doc.merge_span(1, 5, "x", IDIOM_TAG);
        doc.merge_span(1, 1, "x", IDIOM_TAG);
        assert_eq!(doc.texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_sentences() {
        let doc = Doc::from_words(["hi", ".", "how", "are", "you", "?", "fine"]);
        let sents = doc.sentences();
        assert_eq!(sents.len(), 3);
        assert_eq!(sents[0].len(), 2);
        assert_eq!(sents[1].len(), 4);
        assert_eq!(sents[2][0].text, "fine");
    }

    #[test]
    fn test_lemma_fallback() {
        let mut token = Token::new("went");
        assert_eq!(token.lemma_or_text(), "went");
        token.lemma = Some("go".to_string());
        assert_eq!(token.lemma_or_text(), "go");
    }
}
