//! List reference idioms and whether they pass the filter

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use idiom2vec::core::paths::ProjectPaths;
use idiom2vec::idioms::{
    is_above_min_len, is_above_min_wc, is_hyphenated, is_not_exception, is_target, load_idioms,
    FilterConfig,
};

#[derive(Serialize)]
struct IdiomRow {
    idiom: String,
    target: bool,
    min_wc: bool,
    min_len: bool,
    hyphenated: bool,
    exception: bool,
}

impl IdiomRow {
    fn new(idiom: String, config: &FilterConfig) -> Self {
        Self {
            target: is_target(&idiom, config),
            min_wc: is_above_min_wc(&idiom, config),
            min_len: is_above_min_len(&idiom, config),
            hyphenated: is_hyphenated(&idiom),
            exception: !is_not_exception(&idiom, config),
            idiom,
        }
    }
}

pub fn run(all: bool, json: bool) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let config = &paths.config.filter;

    let rows: Vec<IdiomRow> = load_idioms(&paths.slide_tsv)
        .with_context(|| format!("Failed to open {}", paths.slide_tsv.display()))?
        .map(|idiom| idiom.map(|idiom| IdiomRow::new(idiom, config)))
        .collect::<Result<Vec<_>, _>>()?;
    let total = rows.len();
    let rows: Vec<IdiomRow> = rows.into_iter().filter(|r| all || r.target).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        if row.target {
            println!("  {} {}", "✓".green(), row.idiom);
        } else if row.exception {
            println!("  {} {} {}", "✗".red(), row.idiom, "(excluded)".dimmed());
        } else {
            println!("  {} {}", "·".dimmed(), row.idiom.dimmed());
        }
    }
    println!();
    let targets = rows.iter().filter(|r| r.target).count();
    println!("{} {} / {} target idioms", "→".blue(), targets, total);

    Ok(())
}
