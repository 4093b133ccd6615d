use core_types::SeriesKind;
use thiserror::Error;

/// Fatal conditions. Any of these aborts the computation before a partial result exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error(
        "Series length mismatch: portfolio has {expected} observations but {series} has {actual} (both must be non-empty and equal)"
    )]
    LengthMismatch {
        series: SeriesKind,
        expected: usize,
        actual: usize,
    },

    #[error("Not enough data to perform calculation: {actual} observations, at least {required} required")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid data in {series} series at index {index}: value is not a finite number")]
    InvalidData { series: SeriesKind, index: usize },

    #[error("Extreme value in {series} series at index {index}: {value}% exceeds the ±{bound}% bound")]
    ExtremeValue {
        series: SeriesKind,
        index: usize,
        value: f64,
        bound: f64,
    },

    #[error("Benchmark excess returns have zero variance ({variance:e}); beta is undefined")]
    DegenerateBenchmark { variance: f64 },

    #[error("Regression needs at least 3 observations for positive degrees of freedom, got {observations}")]
    InsufficientDegreesOfFreedom { observations: usize },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Distribution error: {0}")]
    Distribution(String),
}
