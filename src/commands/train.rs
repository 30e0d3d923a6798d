//! Train an idiom2vec model on a COCA NDJSON corpus

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use idiom2vec::corpus::Coca;
use idiom2vec::embeddings::{
    Architecture, EpochCallback, LossRecorder, ProgressLogger, Word2Vec, Word2VecParams,
};

const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 15;

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Size of the embedding vectors
    #[arg(long = "vector_size", default_value_t = 100)]
    pub vector_size: usize,

    /// Maximum distance between the centre word and a context word
    #[arg(long, default_value_t = 10)]
    pub window: usize,

    /// Words seen fewer times are left out of the vocabulary
    #[arg(long = "min_count", default_value_t = 1)]
    pub min_count: usize,

    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// 1: skip-gram, 0: CBOW
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub sg: u8,

    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Track the cumulative training loss
    #[arg(long = "compute_loss")]
    pub compute_loss: bool,

    /// Train on sentences instead of whole documents
    #[arg(long = "doc_is_sent")]
    pub doc_is_sent: bool,

    /// Where to write the per-epoch loss history (JSON)
    #[arg(long = "log_path")]
    pub log_path: Option<PathBuf>,

    #[arg(long = "idiom2vec_model_path")]
    pub model_path: PathBuf,

    /// Optional vectors-only export
    #[arg(long = "idiom2vec_light_kv_path")]
    pub light_kv_path: Option<PathBuf>,

    #[arg(long = "coca_spok_train_ndjson_path")]
    pub corpus_path: PathBuf,

    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Skip the loss chart printed after training
    #[arg(long = "no_plot")]
    pub no_plot: bool,
}

impl TrainArgs {
    pub fn params(&self) -> Word2VecParams {
        Word2VecParams {
            vector_size: self.vector_size,
            window: self.window,
            min_count: self.min_count,
            workers: self.workers,
            architecture: Architecture::from_sg(self.sg),
            epochs: self.epochs,
            compute_loss: self.compute_loss,
            seed: self.seed,
            ..Word2VecParams::default()
        }
    }
}

pub fn run(args: TrainArgs) -> Result<()> {
    let params = args.params();
    let coca = Coca::new(&args.corpus_path, args.doc_is_sent);

    println!("{}", "idiom2vec training".bold());
    println!("{}", "=".repeat(50));
    println!("  Corpus:       {}", args.corpus_path.display());
    println!(
        "  Unit:         {}",
        if args.doc_is_sent { "sentence" } else { "document" }
    );
    println!("  Architecture: {}", params.architecture.name().cyan());
    println!(
        "  Vector size:  {}  Window: {}  Epochs: {}",
        params.vector_size, params.window, params.epochs
    );
    println!();

    let mut recorder = LossRecorder::new();
    let mut progress = ProgressLogger;
    let model = {
        let mut callbacks: [&mut dyn EpochCallback; 2] = [&mut recorder, &mut progress];
        Word2Vec::train(params, &coca, &mut callbacks)
            .with_context(|| format!("Training failed on {}", args.corpus_path.display()))?
    };
    let history = recorder.into_history();

    model
        .save(&args.model_path)
        .with_context(|| format!("Failed to save model to {}", args.model_path.display()))?;
    println!(
        "{} Model saved to {} ({} words)",
        "✓".green(),
        args.model_path.display(),
        model.vocab().len()
    );

    if let Some(kv_path) = &args.light_kv_path {
        model.keyed_vectors()?.save(kv_path)?;
        println!("{} Light KV saved to {}", "✓".green(), kv_path.display());
    }

    if let Some(log_path) = &args.log_path {
        history.save(log_path)?;
        println!("{} Loss history saved to {}", "✓".green(), log_path.display());
    }

    if args.compute_loss && !args.no_plot {
        println!();
        print!("{}", history.render(PLOT_WIDTH, PLOT_HEIGHT));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        train: TrainArgs,
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from([
            "train",
            "--idiom2vec_model_path",
            "m.bin",
            "--coca_spok_train_ndjson_path",
            "c.ndjson",
        ])
        .unwrap();
        let params = cli.train.params();
        assert_eq!(params.vector_size, 100);
        assert_eq!(params.window, 10);
        assert_eq!(params.min_count, 1);
        assert_eq!(params.workers, 4);
        assert_eq!(params.architecture, Architecture::SkipGram);
        assert_eq!(params.epochs, 50);
        assert!(!params.compute_loss);
        assert!(!cli.train.doc_is_sent);
    }

    #[test]
    fn test_window_flag_feeds_params() {
        let cli = Cli::try_parse_from([
            "train",
            "--window",
            "3",
            "--sg",
            "0",
            "--compute_loss",
            "--idiom2vec_model_path",
            "m.bin",
            "--coca_spok_train_ndjson_path",
            "c.ndjson",
        ])
        .unwrap();
        let params = cli.train.params();
        assert_eq!(params.window, 3);
        assert_eq!(params.architecture, Architecture::Cbow);
        assert!(params.compute_loss);
    }

    #[test]
    fn test_sg_out_of_range() {
        let result = Cli::try_parse_from([
            "train",
            "--sg",
            "2",
            "--idiom2vec_model_path",
            "m.bin",
            "--coca_spok_train_ndjson_path",
            "c.ndjson",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_writes_artifacts() -> Result<()> {
        let dir = tempfile::TempDir::new()?;
        let corpus = dir.path().join("coca.ndjson");
        std::fs::write(
            &corpus,
            "{\"sents\": [[\"he\", \"kick the bucket\", \"today\"], [\"she\", \"spill the beans\"]]}\n"
                .repeat(10),
        )?;

        let args = TrainArgs {
            vector_size: 8,
            window: 2,
            min_count: 1,
            workers: 1,
            sg: 1,
            epochs: 2,
            compute_loss: true,
            doc_is_sent: true,
            log_path: Some(dir.path().join("loss.json")),
            model_path: dir.path().join("model.bin"),
            light_kv_path: Some(dir.path().join("kv.bin")),
            corpus_path: corpus,
            seed: 1,
            no_plot: true,
        };
        run(args)?;

        assert!(dir.path().join("model.bin").exists());
        let kv = idiom2vec::embeddings::KeyedVectors::load(&dir.path().join("kv.bin"))?;
        assert!(kv.contains("kick the bucket"));
        let history = idiom2vec::embeddings::LossHistory::load(&dir.path().join("loss.json"))?;
        assert_eq!(history.len(), 2);
        Ok(())
    }
}
