//! Decluster command: thin over-clustered samples with the proximity filter.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use declust_distance::{Distance, FilterResult};
use declust_io::{read_delimited, write_delimited};

use crate::cli::DeclusterArgs;
use crate::config::DeclustConfig;
use crate::convert;

/// JSON summary of one proximity-filter run.
#[derive(Debug, Serialize)]
pub struct FilterReport {
    pub n_input: usize,
    pub n_removed: usize,
    pub n_output: usize,
    pub threshold: f64,
    pub strategy: String,
    pub columns: Vec<String>,
    pub min_neighbors: Option<usize>,
    pub max_neighbors: Option<usize>,
    /// Removed input positions, descending.
    pub removed: Vec<usize>,
}

impl FilterReport {
    fn new(distance: &Distance, result: &FilterResult, strategy: String) -> Self {
        Self {
            n_input: distance.count(),
            n_removed: result.n_removed(),
            n_output: result.samples().count(),
            threshold: result.threshold(),
            strategy,
            columns: distance.columns().to_vec(),
            min_neighbors: result.min_neighbors(),
            max_neighbors: result.max_neighbors(),
            removed: result.removed().to_vec(),
        }
    }
}

/// Run the declustering pipeline.
pub fn run(args: DeclusterArgs, config: &DeclustConfig) -> Result<()> {
    let _cmd = info_span!("decluster").entered();
    // 1. Resolve settings, CLI over config
    let input = convert::resolve_path(args.input, config.io.input.as_deref(), "input")?;
    let output = convert::resolve_path(args.output, config.io.output.as_deref(), "output")?;
    let delimiter = convert::parse_delimiter(&config.io.delimiter)?;
    let strategy_name = args
        .strategy
        .unwrap_or_else(|| config.decluster.strategy.clone());
    let strategy = convert::parse_strategy(&strategy_name)?;
    let threshold = args.threshold.or(config.decluster.threshold);
    let columns = args.columns.or_else(|| config.decluster.columns.clone());

    // 2. Read samples
    info!(path = %input.display(), "reading samples");
    let samples = read_delimited(&input, delimiter)
        .with_context(|| format!("failed to read samples: {}", input.display()))?;
    info!(%samples, "samples loaded");

    // 3. Project and build the distance matrix
    let mut distance = match columns {
        Some(cols) => Distance::with_columns(samples, cols.as_slice()),
        None => Distance::new(samples),
    }
    .context("failed to project samples onto numeric columns")?;
    distance
        .build_distance_matrix(strategy)
        .context("failed to build distance matrix")?;

    // 4. Filter
    let result = distance
        .proximity_filter(threshold)
        .context("proximity filter failed")?;
    info!(
        removed = result.n_removed(),
        remaining = result.samples().count(),
        threshold = result.threshold(),
        "declustering done"
    );

    // 5. Write survivors and the optional report
    write_delimited(&output, result.samples(), delimiter)
        .with_context(|| format!("failed to write samples: {}", output.display()))?;
    info!(path = %output.display(), "declustered samples written");

    if let Some(report_path) = args.report {
        let report = FilterReport::new(&distance, &result, strategy.to_string());
        write_report(&report_path, &report)?;
    }

    Ok(())
}

fn write_report(path: &Path, report: &FilterReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialise report")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
