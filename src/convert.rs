//! Pure conversion functions: TOML config and CLI values -> crate API types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;

use declust_distance::DistanceStrategy;

/// Parses a distance-matrix strategy name into the corresponding enum variant.
pub fn parse_strategy(s: &str) -> Result<DistanceStrategy> {
    s.parse::<DistanceStrategy>()
        .with_context(|| format!("invalid [decluster].strategy: {s:?}"))
}

/// Parses a field delimiter. Accepts one ASCII character, `\t` or `tab`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match (s, s.as_bytes()) {
        ("\\t" | "tab", _) => Ok(b'\t'),
        (_, &[b]) if b.is_ascii() && !matches!(b, b'"' | b'\n' | b'\r') => Ok(b),
        _ => bail!("delimiter must be a single ASCII character, got {s:?}"),
    }
}

/// Picks the CLI path over the config path.
pub fn resolve_path(cli: Option<PathBuf>, config: Option<&Path>, what: &str) -> Result<PathBuf> {
    match cli.or_else(|| config.map(Path::to_path_buf)) {
        Some(p) => Ok(p),
        None => bail!("no {what} path: set [io].{what} in config or use --{what}"),
    }
}

/// Seeded RNG when a seed is given, OS-seeded otherwise. The CLI seed wins.
pub fn build_rng(cli_seed: Option<u64>, config_seed: Option<u64>) -> StdRng {
    match cli_seed.or(config_seed) {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn strategy_names() {
        assert_eq!(parse_strategy("broadcast").unwrap(), DistanceStrategy::Broadcast);
        assert_eq!(parse_strategy("per_row").unwrap(), DistanceStrategy::PerRow);
        assert!(parse_strategy("tiled").is_err());
    }

    #[test]
    fn delimiters() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("\"").is_err());
    }

    #[test]
    fn cli_path_wins() {
        let p = resolve_path(
            Some(PathBuf::from("cli.csv")),
            Some(Path::new("cfg.csv")),
            "input",
        )
        .unwrap();
        assert_eq!(p, PathBuf::from("cli.csv"));
        let p = resolve_path(None, Some(Path::new("cfg.csv")), "input").unwrap();
        assert_eq!(p, PathBuf::from("cfg.csv"));
    }

    #[test]
    fn missing_path_names_the_option() {
        let err = resolve_path(None, None, "output").unwrap_err();
        assert!(err.to_string().contains("--output"));
    }

    #[test]
    fn cli_seed_wins() {
        let a: u64 = build_rng(Some(1), Some(2)).random();
        let b: u64 = build_rng(Some(1), None).random();
        let c: u64 = build_rng(None, Some(2)).random();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
