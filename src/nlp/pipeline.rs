//! Ordered processing pipeline
//!
//! Text is tokenized first, then every named stage runs in insertion order.
//! Each stage takes a document and returns the (possibly rewritten) document.

use crate::error::{IdiomError, IdiomResult};

use super::doc::Doc;
use super::lemmatizer::Lemmatizer;
use super::tokenizer::WhitespaceTokenizer;

pub const TOKENIZER_STAGE: &str = "tokenizer";

/// A named document transformation
pub trait Stage: Send + Sync {
    fn name(&self) -> &str;

    fn process(&self, doc: Doc) -> IdiomResult<Doc>;
}

pub struct Pipeline {
    tokenizer: WhitespaceTokenizer,
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Tokenizer only, no stages
    pub fn blank() -> Self {
        Self {
            tokenizer: WhitespaceTokenizer::new(),
            stages: Vec::new(),
        }
    }

    /// `tokenizer -> lemmatizer`
    pub fn with_lemmatizer(lemmatizer: Lemmatizer) -> Self {
        let mut pipeline = Self::blank();
        pipeline.stages.push(Box::new(lemmatizer));
        pipeline
    }

    pub fn tokenizer(&self) -> &WhitespaceTokenizer {
        &self.tokenizer
    }

    pub fn has_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s.name() == name)
    }

    /// Stage names in execution order, tokenizer first
    pub fn stage_names(&self) -> Vec<&str> {
        std::iter::once(TOKENIZER_STAGE)
            .chain(self.stages.iter().map(|s| s.name()))
            .collect()
    }

    /// Append a stage at the end
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) -> IdiomResult<()> {
        self.check_unique(stage.name())?;
        self.stages.push(stage);
        Ok(())
    }

    /// Insert a stage directly after the stage named `anchor`
    pub fn add_stage_after(&mut self, anchor: &str, stage: Box<dyn Stage>) -> IdiomResult<()> {
        self.check_unique(stage.name())?;
        let position = self
            .stages
            .iter()
            .position(|s| s.name() == anchor)
            .ok_or_else(|| IdiomError::UnknownStage(anchor.to_string()))?;
        self.stages.insert(position + 1, stage);
        Ok(())
    }

    fn check_unique(&self, name: &str) -> IdiomResult<()> {
        if name == TOKENIZER_STAGE || self.has_stage(name) {
            return Err(IdiomError::DuplicateStage(name.to_string()));
        }
        Ok(())
    }

    /// Run the stages over an already tokenized document
    pub fn run(&self, mut doc: Doc) -> IdiomResult<Doc> {
        for stage in &self.stages {
            doc = stage.process(doc)?;
        }
        Ok(doc)
    }

    /// Tokenize `text` and run every stage
    pub fn process(&self, text: &str) -> IdiomResult<Doc> {
        let doc = self.tokenizer.tokenize(text)?;
        self.run(doc)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::with_lemmatizer(Lemmatizer::new())
    }
}
