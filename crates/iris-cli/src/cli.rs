use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, ValueHint};

/// Argument definitions for the `iris` binary.
pub fn build_cli() -> Command {
    Command::new("iris")
        .version(clap::crate_version!())
        .about("Train and score a two-species Iris logistic classifier")
        .arg(
            Arg::new("config")
                .help("Path to a JSON pipeline configuration file")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("train_url")
                .long("train-url")
                .help("URL or local path of the training CSV")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::Url),
        )
        .arg(
            Arg::new("test_url")
                .long("test-url")
                .help("URL or local path of the test CSV")
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::Url),
        )
        .arg(
            Arg::new("test_fraction")
                .long("test-fraction")
                .help("Share of rows held out for testing, in (0, 1)")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("epochs")
                .long("epochs")
                .help("Training passes over the data")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("batch_size")
                .long("batch-size")
                .help("Rows per mini-batch")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for reproducible splitting and shuffling")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("learning_rate")
                .long("learning-rate")
                .help("Gradient step size")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("model_type")
                .long("model-type")
                .help("Override the model type from the JSON config.")
                .value_parser(["logistic"])
                .value_hint(ValueHint::Other),
        )
        .arg(
            Arg::new("cache_dir")
                .long("cache-dir")
                .help("Directory for downloaded CSV files")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::DirPath),
        )
        .arg(
            Arg::new("no_shuffle")
                .long("no-shuffle")
                .help("Keep row order fixed during training.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print_config")
                .long("print-config")
                .help("Print the effective configuration as JSON and exit.")
                .action(ArgAction::SetTrue),
        )
}
