use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The sampling frequency of a return series. Fixes every annualization in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl AnalysisPeriod {
    /// Number of observations that make up one year.
    pub fn periods_per_year(&self) -> u32 {
        match self {
            AnalysisPeriod::Monthly => 12,
            AnalysisPeriod::Quarterly => 4,
            AnalysisPeriod::Yearly => 1,
        }
    }

    /// Scales a per-period standard deviation to an annual one.
    pub fn volatility_scale(&self) -> f64 {
        f64::from(self.periods_per_year()).sqrt()
    }

    /// Converts an annualized rate (in percent) to the matching per-period rate.
    pub fn per_period_rate(&self, annual_rate: f64) -> f64 {
        annual_rate / f64::from(self.periods_per_year())
    }
}

impl fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisPeriod::Monthly => "monthly",
            AnalysisPeriod::Quarterly => "quarterly",
            AnalysisPeriod::Yearly => "yearly",
        };
        f.write_str(name)
    }
}

impl FromStr for AnalysisPeriod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(AnalysisPeriod::Monthly),
            "quarterly" => Ok(AnalysisPeriod::Quarterly),
            "yearly" | "annual" => Ok(AnalysisPeriod::Yearly),
            other => Err(CoreError::InvalidInput(
                "analysis_period".to_string(),
                format!("'{}' is not one of monthly, quarterly, yearly", other),
            )),
        }
    }
}

/// Identifies which input sequence a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Portfolio,
    Benchmark,
    Market,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeriesKind::Portfolio => "portfolio",
            SeriesKind::Benchmark => "benchmark",
            SeriesKind::Market => "market",
        };
        f.write_str(name)
    }
}

/// The risk-adjusted ratios that can fall back to a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RatioKind {
    Sharpe,
    Sortino,
    Treynor,
    Information,
    Calmar,
    Omega,
    UpCapture,
    DownCapture,
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RatioKind::Sharpe => "Sharpe ratio",
            RatioKind::Sortino => "Sortino ratio",
            RatioKind::Treynor => "Treynor ratio",
            RatioKind::Information => "information ratio",
            RatioKind::Calmar => "Calmar ratio",
            RatioKind::Omega => "Omega ratio",
            RatioKind::UpCapture => "up-capture ratio",
            RatioKind::DownCapture => "down-capture ratio",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_per_year_match_the_sampling_frequency() {
        assert_eq!(AnalysisPeriod::Monthly.periods_per_year(), 12);
        assert_eq!(AnalysisPeriod::Quarterly.periods_per_year(), 4);
        assert_eq!(AnalysisPeriod::Yearly.periods_per_year(), 1);
        assert_eq!(AnalysisPeriod::Yearly.volatility_scale(), 1.0);
    }

    #[test]
    fn per_period_rate_divides_the_annual_rate() {
        assert!((AnalysisPeriod::Monthly.per_period_rate(2.4) - 0.2).abs() < 1e-12);
        assert!((AnalysisPeriod::Quarterly.per_period_rate(2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parses_period_names_case_insensitively() {
        assert_eq!("Monthly".parse::<AnalysisPeriod>(), Ok(AnalysisPeriod::Monthly));
        assert_eq!(" quarterly ".parse::<AnalysisPeriod>(), Ok(AnalysisPeriod::Quarterly));
        assert_eq!("annual".parse::<AnalysisPeriod>(), Ok(AnalysisPeriod::Yearly));
        assert!("weekly".parse::<AnalysisPeriod>().is_err());
    }
}
