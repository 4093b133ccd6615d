use crate::error::AnalyticsError;
use crate::stats;
use configuration::AnalysisSettings;
use core_types::{Advisory, SeriesKind};

/// Checks raw return sequences before any statistic is computed.
#[derive(Debug, Clone)]
pub struct SeriesValidator {
    min_observations: usize,
    max_abs_return: f64,
    correlation_floor: f64,
    correlation_ceiling: f64,
}

impl SeriesValidator {
    pub fn new(settings: &AnalysisSettings) -> Self {
        Self {
            min_observations: settings.min_observations,
            max_abs_return: settings.max_abs_return,
            correlation_floor: settings.correlation_floor,
            correlation_ceiling: settings.correlation_ceiling,
        }
    }

    /// Validates the aligned series and returns an immutable snapshot of them.
    ///
    /// Checks run in a fixed order: lengths, minimum observations, finiteness, then the
    /// magnitude bound. The first failure is returned. A suspicious correlation is not
    /// fatal; it is recorded on the snapshot as an advisory.
    pub fn validate(
        &self,
        portfolio: &[f64],
        benchmark: &[f64],
        market: Option<&[f64]>,
    ) -> Result<ValidatedSeries, AnalyticsError> {
        let n = portfolio.len();
        check_length(n, benchmark.len(), SeriesKind::Benchmark)?;
        if let Some(market) = market {
            check_length(n, market.len(), SeriesKind::Market)?;
        }

        if n < self.min_observations {
            return Err(AnalyticsError::InsufficientData {
                required: self.min_observations,
                actual: n,
            });
        }

        self.check_values(portfolio, SeriesKind::Portfolio)?;
        self.check_values(benchmark, SeriesKind::Benchmark)?;
        if let Some(market) = market {
            self.check_values(market, SeriesKind::Market)?;
        }

        let correlation = stats::correlation(portfolio, benchmark);
        let mut advisories = Vec::new();
        if correlation.abs() < self.correlation_floor || correlation.abs() > self.correlation_ceiling {
            tracing::debug!(correlation, "Portfolio/benchmark correlation outside the plausible band.");
            advisories.push(Advisory::SuspiciousCorrelation {
                correlation,
                floor: self.correlation_floor,
                ceiling: self.correlation_ceiling,
            });
        }

        Ok(ValidatedSeries {
            portfolio: portfolio.to_vec(),
            benchmark: benchmark.to_vec(),
            market: market.map(<[f64]>::to_vec),
            correlation,
            advisories,
        })
    }

    fn check_values(&self, values: &[f64], series: SeriesKind) -> Result<(), AnalyticsError> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(AnalyticsError::InvalidData { series, index });
            }
            if value.abs() > self.max_abs_return {
                return Err(AnalyticsError::ExtremeValue {
                    series,
                    index,
                    value,
                    bound: self.max_abs_return,
                });
            }
        }
        Ok(())
    }
}

fn check_length(expected: usize, actual: usize, series: SeriesKind) -> Result<(), AnalyticsError> {
    if expected == 0 || actual != expected {
        return Err(AnalyticsError::LengthMismatch {
            series,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Input series that passed validation. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSeries {
    portfolio: Vec<f64>,
    benchmark: Vec<f64>,
    market: Option<Vec<f64>>,
    correlation: f64,
    advisories: Vec<Advisory>,
}

impl ValidatedSeries {
    pub fn portfolio(&self) -> &[f64] {
        &self.portfolio
    }

    pub fn benchmark(&self) -> &[f64] {
        &self.benchmark
    }

    pub fn market(&self) -> Option<&[f64]> {
        self.market.as_deref()
    }

    /// The regressor: the market series when one was supplied, otherwise the benchmark.
    pub fn factor(&self) -> &[f64] {
        self.market.as_deref().unwrap_or(&self.benchmark)
    }

    pub fn len(&self) -> usize {
        self.portfolio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }

    /// Pearson correlation of the portfolio and benchmark series.
    pub fn correlation(&self) -> f64 {
        self.correlation
    }

    pub fn advisories(&self) -> &[Advisory] {
        &self.advisories
    }
}
