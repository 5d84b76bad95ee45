//! Build train/validation dataset files from a CoBaLD CoNLL-U Plus corpus.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use cobald::constants::export::{TRAIN_FILENAME, VALIDATION_FILENAME};
use cobald::constants::splitter::DEFAULT_TRAIN_FRACTION;
use cobald::export::write_jsonl;
use cobald::reader::read_sentences;
use cobald::splitter::{train_test_split, TagCategory};
use cobald::CobaldError;

#[derive(Debug, Parser)]
#[command(
    name = "build-dataset",
    disable_help_subcommand = true,
    about = "Parse, validate, and split a CoBaLD treebank",
    long_about = "Parse a CoBaLD CoNLL-U Plus file, validate every sentence, and split the \
                  corpus into stratified train/validation subsets written as JSON lines."
)]
struct Args {
    /// Path to the input .conllu file.
    data_path: PathBuf,
    /// Directory receiving the train/validation JSON-lines files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Relative size of the train set.
    #[arg(long, default_value_t = DEFAULT_TRAIN_FRACTION)]
    train_fraction: f64,
    /// Comma-separated tag categories to stratify on (defaults to all).
    #[arg(long, value_delimiter = ',')]
    tagsets: Vec<TagCategory>,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CobaldError> {
    let sentences = read_sentences(&args.data_path)?;
    info!(sentences = sentences.len(), "parsed corpus");

    let categories = if args.tagsets.is_empty() {
        TagCategory::ALL.to_vec()
    } else {
        args.tagsets.clone()
    };
    let (train, validation) = train_test_split(sentences, args.train_fraction, &categories)?;

    std::fs::create_dir_all(&args.output_dir)?;
    write_jsonl(args.output_dir.join(TRAIN_FILENAME), &train)?;
    write_jsonl(args.output_dir.join(VALIDATION_FILENAME), &validation)?;
    info!(
        train = train.len(),
        validation = validation.len(),
        output_dir = %args.output_dir.display(),
        "wrote dataset splits"
    );
    Ok(())
}
