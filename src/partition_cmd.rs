//! Split, folds and subsample commands.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug_span, info, info_span};

use declust_io::{read_delimited, write_delimited};
use declust_samples::Samples;

use crate::cli::{FoldsArgs, SplitArgs, SubsampleArgs};
use crate::config::DeclustConfig;
use crate::convert;

/// Train/validation split.
pub fn run_split(args: SplitArgs, config: &DeclustConfig) -> Result<()> {
    let _cmd = info_span!("split").entered();
    let input = convert::resolve_path(args.input, config.io.input.as_deref(), "input")?;
    let delimiter = convert::parse_delimiter(&config.io.delimiter)?;
    let percentage = args.percentage.unwrap_or(config.partition.percentage);
    let mut rng = convert::build_rng(args.seed, config.seed);

    let samples = read(&input, delimiter)?;
    let (train, validation) = samples
        .partition(percentage, &mut rng)
        .context("failed to partition samples")?;
    info!(
        n_train = train.count(),
        n_validation = validation.count(),
        percentage,
        "samples split"
    );

    write(&args.train, &train, delimiter)?;
    write(&args.validation, &validation, delimiter)?;
    Ok(())
}

/// K-fold cross-validation sets.
pub fn run_folds(args: FoldsArgs, config: &DeclustConfig) -> Result<()> {
    let _cmd = info_span!("folds").entered();
    let input = convert::resolve_path(args.input, config.io.input.as_deref(), "input")?;
    let delimiter = convert::parse_delimiter(&config.io.delimiter)?;
    let k = args.k.unwrap_or(config.partition.k);
    let mut rng = convert::build_rng(args.seed, config.seed);

    let samples = read(&input, delimiter)?;
    let folds = samples
        .make_folds(k, &mut rng)
        .context("failed to make folds")?;

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;
    for (i, fold) in folds.into_iter().enumerate() {
        let _fold = debug_span!("fold", idx = i).entered();
        let (train, validation) = fold.into_parts();
        write(
            &args.output_dir.join(format!("fold_{i}_train.csv")),
            &train,
            delimiter,
        )?;
        write(
            &args.output_dir.join(format!("fold_{i}_validation.csv")),
            &validation,
            delimiter,
        )?;
    }
    info!(k, dir = %args.output_dir.display(), "folds written");
    Ok(())
}

/// Random subsample without replacement.
pub fn run_subsample(args: SubsampleArgs, config: &DeclustConfig) -> Result<()> {
    let _cmd = info_span!("subsample").entered();
    let input = convert::resolve_path(args.input, config.io.input.as_deref(), "input")?;
    let output = convert::resolve_path(args.output, config.io.output.as_deref(), "output")?;
    let delimiter = convert::parse_delimiter(&config.io.delimiter)?;
    let n = args.n.or(config.partition.n);
    let mut rng = convert::build_rng(args.seed, config.seed);

    let samples = read(&input, delimiter)?;
    let picked = samples.random_selection(n, &mut rng);
    info!(n_selected = picked.count(), "samples drawn");

    write(&output, &picked, delimiter)
}

fn read(path: &Path, delimiter: u8) -> Result<Samples> {
    info!(path = %path.display(), "reading samples");
    let samples = read_delimited(path, delimiter)
        .with_context(|| format!("failed to read samples: {}", path.display()))?;
    info!(%samples, "samples loaded");
    Ok(samples)
}

fn write(path: &Path, samples: &Samples, delimiter: u8) -> Result<()> {
    write_delimited(path, samples, delimiter)
        .with_context(|| format!("failed to write samples: {}", path.display()))?;
    info!(path = %path.display(), n = samples.count(), "samples written");
    Ok(())
}
