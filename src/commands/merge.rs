//! Run the idiom pipeline over a piece of text

use anyhow::Result;
use colored::*;
use serde_json::json;

use idiom2vec::core::paths::ProjectPaths;
use idiom2vec::nlp::Doc;

use super::load_idiom_nlp;

pub fn run(text: &str, json: bool) -> Result<()> {
    let paths = ProjectPaths::new()?;
    let nlp = load_idiom_nlp(&paths)?;
    let doc = nlp.process(text)?;

    if json {
        let result = json!({
            "text": text,
            "stages": nlp.pipeline().stage_names(),
            "tokens": doc.tokens,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_doc(&doc);
    }
    Ok(())
}

fn print_doc(doc: &Doc) {
    let rendered: Vec<String> = doc
        .tokens
        .iter()
        .map(|t| {
            if t.is_idiom() {
                format!("[{}]", t.lemma_or_text()).green().bold().to_string()
            } else {
                t.text.clone()
            }
        })
        .collect();
    println!("{}", rendered.join(" "));

    let idioms: Vec<_> = doc.tokens.iter().filter(|t| t.is_idiom()).collect();
    println!();
    if idioms.is_empty() {
        println!("{}", "No idioms found.".dimmed());
    } else {
        for t in idioms {
            println!("  {} {} → {}", "•".cyan(), t.text, t.lemma_or_text().green());
        }
    }
}
