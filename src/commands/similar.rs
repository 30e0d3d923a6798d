//! Nearest neighbours from a keyed vectors artifact

use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::path::Path;

use idiom2vec::embeddings::KeyedVectors;

pub fn run(word: &str, kv_path: &Path, limit: usize, json: bool) -> Result<()> {
    let kv = KeyedVectors::load(kv_path)
        .with_context(|| format!("Failed to load keyed vectors {}", kv_path.display()))?;
    let word = word.to_lowercase();

    if !kv.contains(&word) {
        if json {
            println!("{}", json!({ "error": format!("'{}' is not in the vocabulary.", word) }));
        } else {
            println!("{}", format!("'{}' is not in the vocabulary.", word).red());
        }
        std::process::exit(1);
    }

    let neighbours = kv.most_similar(&word, limit)?;

    if json {
        let results: Vec<_> = neighbours
            .iter()
            .map(|(w, score)| json!({ "word": w, "similarity": score }))
            .collect();
        let output = json!({ "query": word, "results": results });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}", "Most similar to".bold(), word.cyan().bold());
    println!("{}", "=".repeat(50));
    for (i, (w, score)) in neighbours.iter().enumerate() {
        let label = if w.contains(' ') || w.contains('-') {
            w.green().to_string()
        } else {
            w.to_string()
        };
        println!("{:>3}. {:<40} {:.4}", i + 1, label, score);
    }
    Ok(())
}
