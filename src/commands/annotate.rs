//! Build an NDJSON training corpus from raw text
//!
//! Each non-empty input line is one document. It is run through the idiom
//! pipeline and written as `{"sents": [[lemma, ...], ...]}`.

use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use idiom2vec::core::paths::ProjectPaths;
use idiom2vec::corpus::{CorpusRecord, CorpusWriter};
use idiom2vec::nlp::IdiomNlp;

use super::load_idiom_nlp;

#[derive(Debug, Default, PartialEq)]
struct AnnotateStats {
    documents: usize,
    sentences: usize,
    idioms: usize,
}

pub fn run(input: &Path, output: &Path, json: bool) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let nlp = load_idiom_nlp(&paths)?;
    let stats = annotate(&nlp, input, output)?;

    if json {
        let result = json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "documents": stats.documents,
            "sentences": stats.sentences,
            "idioms": stats.idioms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} Wrote {} documents ({} sentences, {} idioms) to {}",
            "✓".green(),
            stats.documents,
            stats.sentences,
            stats.idioms.to_string().cyan(),
            output.display()
        );
    }
    Ok(())
}

fn annotate(nlp: &IdiomNlp, input: &Path, output: &Path) -> Result<AnnotateStats> {
    let file =
        File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let mut writer = CorpusWriter::create(output)?;
    let mut stats = AnnotateStats::default();

    for (line_no, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read {}", input.display()))?;
        if line.trim().is_empty() {
            continue;
        }

        let doc = nlp
            .process(&line)
            .with_context(|| format!("Failed to process line {}", line_no + 1))?;
        let record = CorpusRecord::from_doc(&doc);

        stats.documents += 1;
        stats.sentences += record.sents.len();
        stats.idioms += doc.tokens.iter().filter(|t| t.is_idiom()).count();
        writer.write(&record)?;
    }

    writer.finish()?;
    tracing::info!(documents = stats.documents, idioms = stats.idioms, "Annotated corpus");
    Ok(stats)
}
