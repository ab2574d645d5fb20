//! Column-wise reducers used for centroids and default thresholds.

use std::fmt;
use std::str::FromStr;

use crate::error::DistanceError;

/// Statistic that summarises one matrix column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Reducer {
    /// Middle value (mean of the two middle values for even counts).
    #[default]
    Median,
    /// Arithmetic mean.
    Mean,
    /// Linear-interpolated percentile, in percent.
    Percentile(f64),
}

impl Reducer {
    /// Checks that a percentile lies in `[0, 100]`.
    pub fn validate(&self) -> Result<(), DistanceError> {
        match *self {
            Self::Percentile(q) if !(0.0..=100.0).contains(&q) => {
                Err(DistanceError::InvalidPercentile { q })
            }
            _ => Ok(()),
        }
    }

    /// Reduces one column. `column` must not be empty.
    pub(crate) fn reduce(&self, column: &[f64]) -> f64 {
        match *self {
            Self::Median => declust_stats::median(column),
            Self::Mean => declust_stats::mean(column),
            Self::Percentile(q) => declust_stats::percentile(column, q),
        }
    }
}

impl FromStr for Reducer {
    type Err = DistanceError;

    /// Parses `median`, `mean` or `percentile_<k>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let reducer = match lower.as_str() {
            "median" => Self::Median,
            "mean" => Self::Mean,
            other => {
                let q = other
                    .strip_prefix("percentile_")
                    .and_then(|k| k.parse::<f64>().ok())
                    .ok_or_else(|| DistanceError::UnknownReducer {
                        method: s.to_string(),
                    })?;
                Self::Percentile(q)
            }
        };
        reducer.validate()?;
        Ok(reducer)
    }
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Median => f.write_str("median"),
            Self::Mean => f.write_str("mean"),
            Self::Percentile(q) => write!(f, "percentile_{q}"),
        }
    }
}
