use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "declust.toml";

/// Top-level declust configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclustConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Declustering settings.
    #[serde(default)]
    pub decluster: DeclusterToml,

    /// Split, fold and subsample settings.
    #[serde(default)]
    pub partition: PartitionToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclusterToml {
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl Default for DeclusterToml {
    fn default() -> Self {
        Self {
            columns: None,
            threshold: None,
            strategy: default_strategy(),
        }
    }
}

fn default_strategy() -> String {
    "broadcast".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionToml {
    #[serde(default = "default_percentage")]
    pub percentage: f64,
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default)]
    pub n: Option<usize>,
}

impl Default for PartitionToml {
    fn default() -> Self {
        Self {
            percentage: default_percentage(),
            k: default_k(),
            n: None,
        }
    }
}

fn default_percentage() -> f64 {
    70.0
}
fn default_k() -> usize {
    5
}

/// Loads the config at `path`, or `declust.toml` from the working directory
/// if it exists, or built-in defaults.
pub fn load(path: Option<&Path>) -> Result<DeclustConfig> {
    let path = match path {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Path::new(DEFAULT_CONFIG_FILE),
        None => {
            debug!("no config file, using defaults");
            return Ok(DeclustConfig::default());
        }
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: DeclustConfig = toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: DeclustConfig = toml::from_str("").unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.io.delimiter, ",");
        assert_eq!(config.decluster.strategy, "broadcast");
        assert_eq!(config.partition.percentage, 70.0);
        assert_eq!(config.partition.k, 5);
    }

    #[test]
    fn full_toml() {
        let config: DeclustConfig = toml::from_str(
            r#"
            seed = 7

            [io]
            input = "obs.csv"
            output = "declustered.csv"
            delimiter = ";"

            [decluster]
            columns = ["x", "y"]
            threshold = 250.0
            strategy = "per_row"

            [partition]
            percentage = 80.0
            k = 10
            n = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.io.input, Some(PathBuf::from("obs.csv")));
        assert_eq!(config.io.delimiter, ";");
        assert_eq!(
            config.decluster.columns,
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(config.decluster.threshold, Some(250.0));
        assert_eq!(config.partition.k, 10);
        assert_eq!(config.partition.n, Some(100));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<DeclustConfig, _> = toml::from_str("[decluster]\nradius = 1.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "seed = 3\n").unwrap();
        let config = load(Some(path.as_path())).unwrap();
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn load_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }
}
