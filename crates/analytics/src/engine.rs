use crate::attribution::{Attribution, BenchmarkComparison};
use crate::error::AnalyticsError;
use crate::params::AnalysisParams;
use crate::performance::{self, PerformanceMetrics};
use crate::regression::{self, RegressionResult};
use crate::report::{AnalyticsReport, WindowSnapshot};
use crate::risk::RiskMetrics;
use crate::validator::{SeriesValidator, ValidatedSeries};
use configuration::AnalysisSettings;
use core_types::Advisory;

/// A stateless calculator running validation, regression, risk, performance and attribution
/// over one pair of return series.
///
/// The engine holds only the settings and per-request conventions; every call is a pure
/// function of its arguments, so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    settings: AnalysisSettings,
    params: AnalysisParams,
    validator: SeriesValidator,
}

impl AnalyticsEngine {
    pub fn new(settings: AnalysisSettings, params: AnalysisParams) -> Self {
        let validator = SeriesValidator::new(&settings);
        Self {
            settings,
            params,
            validator,
        }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    pub fn validate(
        &self,
        portfolio: &[f64],
        benchmark: &[f64],
        market: Option<&[f64]>,
    ) -> Result<ValidatedSeries, AnalyticsError> {
        self.validator.validate(portfolio, benchmark, market)
    }

    /// The main entry point: validates the raw series and runs the full pipeline.
    ///
    /// # Arguments
    ///
    /// * `portfolio` - Period returns of the portfolio, in percent.
    /// * `benchmark` - Period returns of the benchmark, aligned with `portfolio`.
    /// * `market` - Optional market series used as the regression factor instead of the benchmark.
    pub fn calculate(
        &self,
        portfolio: &[f64],
        benchmark: &[f64],
        market: Option<&[f64]>,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let series = self.validate(portfolio, benchmark, market)?;
        self.calculate_validated(&series)
    }

    /// Runs the pipeline on series that already passed validation, carrying their advisories
    /// into the report.
    pub fn calculate_validated(
        &self,
        series: &ValidatedSeries,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let mut report = self.calculate_series(series.portfolio(), series.benchmark(), series.factor())?;
        let mut advisories = series.advisories().to_vec();
        advisories.append(&mut report.advisories);
        report.advisories = advisories;
        Ok(report)
    }

    /// Runs the pipeline without the input checks. Used for derived series (stress scenarios)
    /// whose magnitudes may legitimately leave the validation bound.
    pub fn calculate_series(
        &self,
        portfolio: &[f64],
        benchmark: &[f64],
        factor: &[f64],
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let mut advisories = Vec::new();

        let regression = self.calculate_regression(portfolio, factor)?;
        let risk = self.calculate_risk(portfolio, benchmark, factor, &regression, &mut advisories)?;
        let performance =
            self.calculate_performance(portfolio, benchmark, &regression, &risk, &mut advisories);
        let attribution = Attribution::compute(factor, &regression, &risk, &performance, &self.params);
        let benchmark_comparison =
            BenchmarkComparison::compute(benchmark, &risk, &performance, &self.params);

        Ok(AnalyticsReport {
            regression,
            risk,
            performance,
            attribution,
            benchmark_comparison,
            advisories,
        })
    }

    /// The reduced computation for one rolling window: regression and Sharpe only.
    pub fn calculate_window(
        &self,
        portfolio: &[f64],
        factor: &[f64],
    ) -> Result<WindowSnapshot, AnalyticsError> {
        let regression = self.calculate_regression(portfolio, factor)?;
        let mut advisories = Vec::new();
        let sharpe_ratio =
            performance::sharpe_ratio(portfolio, &self.params, &self.settings, &mut advisories);
        Ok(WindowSnapshot {
            regression,
            sharpe_ratio,
            advisories,
        })
    }

    fn calculate_regression(
        &self,
        portfolio: &[f64],
        factor: &[f64],
    ) -> Result<RegressionResult, AnalyticsError> {
        regression::regress(portfolio, factor, &self.params)
    }

    fn calculate_risk(
        &self,
        portfolio: &[f64],
        benchmark: &[f64],
        factor: &[f64],
        regression: &RegressionResult,
        advisories: &mut Vec<Advisory>,
    ) -> Result<RiskMetrics, AnalyticsError> {
        RiskMetrics::compute(
            portfolio,
            benchmark,
            factor,
            regression.beta,
            &self.params,
            &self.settings,
            advisories,
        )
    }

    fn calculate_performance(
        &self,
        portfolio: &[f64],
        benchmark: &[f64],
        regression: &RegressionResult,
        risk: &RiskMetrics,
        advisories: &mut Vec<Advisory>,
    ) -> PerformanceMetrics {
        PerformanceMetrics::compute(
            portfolio,
            benchmark,
            regression,
            risk,
            &self.params,
            &self.settings,
            advisories,
        )
    }
}
