use crate::enums::RatioKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-fatal condition raised while computing a result.
///
/// Advisories never stop a computation. They are attached to the output next to the
/// numbers they qualify so callers can surface them to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Advisory {
    /// The portfolio/benchmark correlation is implausibly weak or implausibly strong.
    SuspiciousCorrelation {
        correlation: f64,
        floor: f64,
        ceiling: f64,
    },
    /// Systematic risk exceeded total risk and idiosyncratic risk was clamped to zero.
    RiskDecompositionWarning { shortfall: f64 },
    /// A ratio had a zero (or empty) denominator and was reported as a sentinel.
    RatioUndefined { ratio: RatioKind, sentinel: f64 },
    /// The series was too short for the default rolling window, so no rolling series was produced.
    RollingSkipped { observations: usize, window: usize },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::SuspiciousCorrelation {
                correlation,
                floor,
                ceiling,
            } => write!(
                f,
                "Suspicious correlation {:.4} between portfolio and benchmark (expected |r| within [{}, {}])",
                correlation, floor, ceiling
            ),
            Advisory::RiskDecompositionWarning { shortfall } => write!(
                f,
                "Systematic risk exceeded total risk by {:.6}; idiosyncratic risk clamped to zero",
                shortfall
            ),
            Advisory::RatioUndefined { ratio, sentinel } => {
                write!(f, "The {} is undefined for this data; reported as {}", ratio, sentinel)
            }
            Advisory::RollingSkipped {
                observations,
                window,
            } => write!(
                f,
                "Rolling analysis skipped: {} observations cannot fill a window of {}",
                observations, window
            ),
        }
    }
}
