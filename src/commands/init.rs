//! Project initialization command

use anyhow::Result;
use colored::*;

use idiom2vec::core::config::{Config, CONFIG_FILE};
use idiom2vec::core::paths::get_project_root;

pub fn run(force: bool) -> Result<()> {
    let root = get_project_root()?;
    let config_path = root.join(CONFIG_FILE);

    println!("{}", "idiom2vec Configuration Generator".bold());
    println!("{}", "=".repeat(50));
    println!();

    if config_path.exists() && !force {
        println!(
            "{} {} already exists. Use --force to overwrite.",
            "→".blue(),
            config_path.display()
        );
        return Ok(());
    }

    Config::default().save(&root)?;
    println!("{} Created {}", "✓".green(), config_path.display());
    println!();
    println!("{}", Config::default_json()?.dimmed());
    println!();
    println!("Next steps:");
    println!(
        "  {} - compile the idiom matcher",
        "idiom2vec build-matcher".cyan()
    );
    println!(
        "  {} - build a training corpus",
        "idiom2vec annotate --input raw.txt --output corpus.ndjson".cyan()
    );
    Ok(())
}
