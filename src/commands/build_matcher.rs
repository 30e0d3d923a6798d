//! Compile target idioms into the matcher artifact

use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::path::PathBuf;

use idiom2vec::core::paths::ProjectPaths;
use idiom2vec::idioms::{load_target_idioms, IdiomMatcher};

use super::load_pipeline;

pub fn run(input: Option<PathBuf>, output: Option<PathBuf>, json: bool) -> Result<()> {
    let paths = ProjectPaths::new()?;
    build(&paths, input, output, json)
}

fn build(
    paths: &ProjectPaths,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let input = input.unwrap_or_else(|| paths.slide_tsv.clone());
    let output = output.unwrap_or_else(|| paths.idiom_matcher.clone());

    let idioms = load_target_idioms(&input, &paths.config.filter)
        .with_context(|| format!("Failed to open idiom reference {}", input.display()))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read idiom reference {}", input.display()))?;

    let pipeline = load_pipeline(paths)?;
    let matcher = IdiomMatcher::from_idioms(idioms.iter(), &pipeline)?;
    matcher
        .save(&output)
        .with_context(|| format!("Failed to save matcher to {}", output.display()))?;

    if json {
        let result = json!({
            "input": input.display().to_string(),
            "output": output.display().to_string(),
            "target_idioms": idioms.len(),
            "patterns": matcher.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", "Idiom Matcher".bold());
        println!("{}", "=".repeat(50));
        println!("  Reference:     {}", input.display());
        println!("  Target idioms: {}", idioms.len());
        println!("  Patterns:      {}", matcher.len().to_string().cyan());
        println!();
        println!("{} Saved {}", "✓".green(), output.display());
    }

    Ok(())
}
