use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Declustering and partitioning of tabular sample data.
#[derive(Parser)]
#[command(
    name = "declust",
    version,
    about = "Declustering and partitioning of tabular sample data"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file [default: declust.toml if present].
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Remove spatially over-clustered samples.
    Decluster(DeclusterArgs),
    /// Split samples into a training and a validation set.
    Split(SplitArgs),
    /// Write k cross-validation folds.
    Folds(FoldsArgs),
    /// Draw a random subsample without replacement.
    Subsample(SubsampleArgs),
}

/// Arguments for the `decluster` subcommand.
#[derive(clap::Args)]
pub struct DeclusterArgs {
    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Columns to measure distance on, comma-separated [default: all].
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Proximity threshold: samples closer than this are neighbors.
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Distance-matrix strategy (`broadcast` or `per_row`).
    #[arg(long)]
    pub strategy: Option<String>,

    /// Path for a JSON summary of the filter run.
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Arguments for the `split` subcommand.
#[derive(clap::Args)]
pub struct SplitArgs {
    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output CSV path for the training set.
    #[arg(long)]
    pub train: PathBuf,

    /// Output CSV path for the validation set.
    #[arg(long)]
    pub validation: PathBuf,

    /// Share of samples used for training, in percent.
    #[arg(short, long)]
    pub percentage: Option<f64>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `folds` subcommand.
#[derive(clap::Args)]
pub struct FoldsArgs {
    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving `fold_<i>_train.csv` and `fold_<i>_validation.csv`.
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Number of folds.
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Arguments for the `subsample` subcommand.
#[derive(clap::Args)]
pub struct SubsampleArgs {
    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output CSV path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of samples to draw [default: all].
    #[arg(short, long)]
    pub n: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,
}
