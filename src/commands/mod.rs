pub mod annotate;
pub mod build_matcher;
pub mod idioms;
pub mod init;
pub mod loss;
pub mod merge;
pub mod similar;
pub mod train;

use anyhow::{Context, Result};

use idiom2vec::core::paths::ProjectPaths;
use idiom2vec::idioms::IdiomMatcher;
use idiom2vec::nlp::{IdiomNlp, Lemmatizer, Pipeline};

/// `tokenizer -> lemmatizer`, with the lemma table from config when set
pub fn load_pipeline(paths: &ProjectPaths) -> Result<Pipeline> {
    let lemmatizer = match &paths.lemma_table {
        Some(table) => Lemmatizer::from_file(table)
            .with_context(|| format!("Failed to load lemma table {}", table.display()))?,
        None => Lemmatizer::new(),
    };
    Ok(Pipeline::with_lemmatizer(lemmatizer))
}

/// Default pipeline plus the `merge_idiom` stage backed by the stored matcher
pub fn load_idiom_nlp(paths: &ProjectPaths) -> Result<IdiomNlp> {
    let pipeline = load_pipeline(paths)?;
    let matcher = IdiomMatcher::load(&paths.idiom_matcher)
        .context("Run 'idiom2vec build-matcher' first")?;
    Ok(IdiomNlp::new(pipeline, matcher)?)
}
