mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::train::TrainArgs;

#[derive(Parser)]
#[command(name = "idiom2vec")]
#[command(about = "Idiom-aware preprocessing and word2vec training", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate .idiom2vec.json in the project root
    Init {
        #[arg(long, help = "Overwrite an existing config")]
        force: bool,
    },

    // ===== Idioms =====
    /// List target idioms from the reference file
    Idioms {
        #[arg(long, help = "Include idioms rejected by the filter")]
        all: bool,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Compile target idioms into the matcher artifact
    #[command(name = "build-matcher")]
    BuildMatcher {
        #[arg(long, help = "Idiom reference TSV (default: from config)")]
        input: Option<PathBuf>,
        #[arg(long, help = "Matcher output path (default: from config)")]
        output: Option<PathBuf>,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Run the idiom pipeline over text and show merged tokens
    Merge {
        text: String,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Build an NDJSON corpus from raw text, one document per line
    Annotate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, help = "JSON output")]
        json: bool,
    },

    // ===== Embeddings =====
    /// Train an idiom2vec model
    Train(TrainArgs),
    /// Nearest neighbours of a word or idiom
    Similar {
        word: String,
        #[arg(long = "kv", help = "Keyed vectors artifact")]
        kv_path: PathBuf,
        #[arg(short, long, default_value = "10", help = "Limit results")]
        limit: usize,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Render a saved loss history
    Loss {
        path: PathBuf,
        #[arg(long, default_value = "60")]
        width: usize,
        #[arg(long, default_value = "15")]
        height: usize,
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("idiom2vec=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => commands::init::run(force),

        Commands::Idioms { all, json } => commands::idioms::run(all, json),
        Commands::BuildMatcher {
            input,
            output,
            json,
        } => commands::build_matcher::run(input, output, json),
        Commands::Merge { text, json } => commands::merge::run(&text, json),
        Commands::Annotate {
            input,
            output,
            json,
        } => commands::annotate::run(&input, &output, json),

        Commands::Train(args) => commands::train::run(args),
        Commands::Similar {
            word,
            kv_path,
            limit,
            json,
        } => commands::similar::run(&word, &kv_path, limit, json),
        Commands::Loss {
            path,
            width,
            height,
            json,
        } => commands::loss::run(&path, width, height, json),
    }
}
