//! Idiom-aware pipeline wrapper
//!
//! Wraps a pipeline and inserts the `merge_idiom` stage right after the
//! lemmatizer. Input text is lowercased before processing, which drops
//! proper-noun capitalization ("Kate" becomes "kate").

use std::sync::Arc;

use crate::error::IdiomResult;
use crate::idioms::{create_merge_idiom_stage, IdiomMatcher};

use super::doc::Doc;
use super::lemmatizer::LEMMATIZER_STAGE;
use super::pipeline::Pipeline;

pub struct IdiomNlp {
    pipeline: Pipeline,
    matcher: Arc<IdiomMatcher>,
}

impl IdiomNlp {
    pub fn new(mut pipeline: Pipeline, matcher: IdiomMatcher) -> IdiomResult<Self> {
        let matcher = Arc::new(matcher);
        let stage = create_merge_idiom_stage(Some(Arc::clone(&matcher)))?;
        pipeline.add_stage_after(LEMMATIZER_STAGE, Box::new(stage))?;
        Ok(Self { pipeline, matcher })
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn matcher(&self) -> &IdiomMatcher {
        &self.matcher
    }

    pub fn process(&self, text: &str) -> IdiomResult<Doc> {
        self.pipeline.process(&text.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdiomError;
    use crate::idioms::MERGE_IDIOM_STAGE;
    use crate::nlp::{Lemmatizer, TOKENIZER_STAGE};

    fn matcher(pipeline: &Pipeline) -> IdiomMatcher {
        IdiomMatcher::from_idioms(["kick the bucket", "well-known"], pipeline).unwrap()
    }

    #[test]
    fn test_merge_stage_after_lemmatizer() {
        let pipeline = Pipeline::default();
        let matcher = matcher(&pipeline);
        let nlp = IdiomNlp::new(pipeline, matcher).unwrap();

        assert_eq!(
            nlp.pipeline().stage_names(),
            vec![TOKENIZER_STAGE, LEMMATIZER_STAGE, MERGE_IDIOM_STAGE]
        );
    }

    #[test]
    fn test_requires_lemmatizer() {
        let pipeline = Pipeline::blank();
        let matcher = matcher(&pipeline);
        let result = IdiomNlp::new(pipeline, matcher);
        assert!(matches!(result, Err(IdiomError::UnknownStage(_))));
    }

    #[test]
    fn test_requires_non_empty_matcher() {
        let result = IdiomNlp::new(Pipeline::default(), IdiomMatcher::new());
        assert!(matches!(result, Err(IdiomError::MissingMatcher)));
    }

    #[test]
    fn test_process_lowercases_and_merges() {
        let pipeline = Pipeline::with_lemmatizer(Lemmatizer::with_entries([("kicked", "kick")]));
        let matcher = matcher(&pipeline);
        let nlp = IdiomNlp::new(pipeline, matcher).unwrap();

        let doc = nlp.process("Kate Kicked the Bucket, a well-known story.").unwrap();
        assert_eq!(
            doc.texts(),
            vec!["kate", "kicked the bucket", ",", "a", "well-known", "story", "."]
        );
        assert_eq!(doc.tokens[1].lemma.as_deref(), Some("kick the bucket"));
        assert!(doc.tokens[4].is_idiom());
    }

    #[test]
    fn test_idiom_with_lemmatized_word_merges() {
        let pipeline = Pipeline::with_lemmatizer(Lemmatizer::with_entries([
            ("spilled", "spill"),
            ("beans", "bean"),
        ]));
        let matcher = IdiomMatcher::from_idioms(["spill the beans"], &pipeline).unwrap();
        let nlp = IdiomNlp::new(pipeline, matcher).unwrap();

        let doc = nlp.process("He finally spilled the beans.").unwrap();
        assert_eq!(doc.lemmas(), vec!["he", "finally", "spill the beans", "."]);
        assert_eq!(doc.tokens[2].text, "spilled the beans");
        assert!(doc.tokens[2].is_idiom());
    }
}
