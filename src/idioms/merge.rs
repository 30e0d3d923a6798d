//! Idiom-merge pipeline stage
//!
//! Rewrites every matched idiom span as a single token whose lemma is the
//! canonical idiom and whose tag is `IDIOM`. Matching reads lemmas, so the
//! stage must run after the lemmatizer.

use std::sync::Arc;

use crate::error::{IdiomError, IdiomResult};
use crate::nlp::{Doc, Stage, IDIOM_TAG};

use super::matcher::IdiomMatcher;

pub const MERGE_IDIOM_STAGE: &str = "merge_idiom";

pub struct MergeIdiomStage {
    matcher: Arc<IdiomMatcher>,
}

impl MergeIdiomStage {
    pub fn new(matcher: Arc<IdiomMatcher>) -> Self {
        Self { matcher }
    }

    pub fn matcher(&self) -> &IdiomMatcher {
        &self.matcher
    }
}

/// Build the merge stage, refusing a missing or empty matcher
pub fn create_merge_idiom_stage(matcher: Option<Arc<IdiomMatcher>>) -> IdiomResult<MergeIdiomStage> {
    match matcher {
        Some(matcher) if !matcher.is_empty() => Ok(MergeIdiomStage::new(matcher)),
        _ => Err(IdiomError::MissingMatcher),
    }
}

impl Stage for MergeIdiomStage {
    fn name(&self) -> &str {
        MERGE_IDIOM_STAGE
    }

    fn process(&self, mut doc: Doc) -> IdiomResult<Doc> {
        let matches = self.matcher.find_matches(&doc);
        // right to left, so earlier spans keep their positions
        for m in matches.iter().rev() {
            if let Some(idiom) = self.matcher.idiom(m.id) {
                doc.merge_span(m.start, m.end, idiom, IDIOM_TAG);
            }
        }
        if !matches.is_empty() {
            tracing::trace!(merged = matches.len(), "Merged idiom spans");
        }
        Ok(doc)
    }
}
