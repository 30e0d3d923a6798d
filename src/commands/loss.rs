//! Render a saved loss history

use anyhow::{Context, Result};
use colored::*;
use serde_json::json;
use std::path::Path;

use idiom2vec::embeddings::LossHistory;

pub fn run(path: &Path, width: usize, height: usize, json: bool) -> Result<()> {
    let history = LossHistory::load(path)
        .with_context(|| format!("Failed to load loss history {}", path.display()))?;

    if json {
        let output = json!({
            "created_at": history.created_at().to_rfc3339(),
            "epochs": history.len(),
            "cumulative": history.losses(),
            "per_epoch": history.per_epoch(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} ({} epochs, recorded {})",
        "Loss History".bold(),
        history.len(),
        history
            .created_at()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!();
    print!("{}", history.render(width, height));
    Ok(())
}
