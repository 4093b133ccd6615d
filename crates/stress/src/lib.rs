//! # Scenario / Stress Tester
//!
//! Applies deterministic, named shocks to copies of the input series and re-runs the
//! analytics pipeline on each copy. The base series are never modified, and scenarios are
//! independent of one another, so they may run concurrently.

use analytics::{AnalyticsEngine, ValidatedSeries, stats};
use configuration::Parallelism;
use core_types::{Advisory, ScenarioSpec};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub mod error;
pub mod generator;

pub use error::StressError;
pub use generator::{default_scenarios, scenario_grid};

/// The pipeline outputs of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub name: String,
    /// Compounded total return of the shocked portfolio, in percent.
    pub portfolio_return: f64,
    /// Compounded total return of the shocked benchmark, in percent.
    pub benchmark_return: f64,
    pub alpha: f64,
    pub beta: f64,
    pub sharpe_ratio: f64,
    pub volatility: f64,
    pub max_drawdown: f64,
    pub advisories: Vec<Advisory>,
}

/// A shocked copy of the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct ShockedSeries {
    pub portfolio: Vec<f64>,
    pub benchmark: Vec<f64>,
    pub market: Option<Vec<f64>>,
}

impl ShockedSeries {
    /// Builds the copy: `p' = m*p + s`, `b' = m*b + k*(m*p - m*b) + s`, and the same blend for
    /// the market series `q`, so the correlation shock moves the regression factor too.
    pub fn apply(spec: &ScenarioSpec, series: &ValidatedSeries) -> Self {
        let m = spec.market_shock;
        let k = spec.correlation_shock.unwrap_or(0.0);
        let s = spec.return_shift.unwrap_or(0.0);

        let blend = |other: &[f64]| -> Vec<f64> {
            series
                .portfolio()
                .iter()
                .zip(other)
                .map(|(p, x)| m * x + k * (m * p - m * x) + s)
                .collect()
        };

        let portfolio = series.portfolio().iter().map(|p| m * p + s).collect();
        let benchmark = blend(series.benchmark());
        let market = series.market().map(blend);

        Self {
            portfolio,
            benchmark,
            market,
        }
    }

    pub fn factor(&self) -> &[f64] {
        self.market.as_deref().unwrap_or(&self.benchmark)
    }
}

/// Runs a list of scenarios against one validated pair of series.
#[derive(Debug, Clone)]
pub struct ScenarioTester<'a> {
    engine: &'a AnalyticsEngine,
    parallelism: Parallelism,
}

impl<'a> ScenarioTester<'a> {
    pub fn new(engine: &'a AnalyticsEngine, parallelism: Parallelism) -> Self {
        Self {
            engine,
            parallelism,
        }
    }

    /// Runs every scenario, returning results in the order the scenarios were given.
    ///
    /// The whole list is checked before any scenario runs; the first failing scenario
    /// aborts the run.
    #[tracing::instrument(name = "stress_run", skip_all, fields(scenarios = scenarios.len()))]
    pub fn run(
        &self,
        series: &ValidatedSeries,
        scenarios: &[ScenarioSpec],
    ) -> Result<Vec<ScenarioResult>, StressError> {
        validate_scenarios(scenarios)?;

        let results = if self.parallelism.should_parallelize(scenarios.len()) {
            scenarios
                .par_iter()
                .map(|spec| self.run_scenario(spec, series))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            scenarios
                .iter()
                .map(|spec| self.run_scenario(spec, series))
                .collect::<Result<Vec<_>, _>>()?
        };

        tracing::info!(scenarios = results.len(), "Stress testing complete.");
        Ok(results)
    }

    pub fn run_scenario(
        &self,
        spec: &ScenarioSpec,
        series: &ValidatedSeries,
    ) -> Result<ScenarioResult, StressError> {
        let shocked = ShockedSeries::apply(spec, series);
        let report = self
            .engine
            .calculate_series(&shocked.portfolio, &shocked.benchmark, shocked.factor())
            .map_err(|source| StressError::Scenario {
                name: spec.name.clone(),
                source,
            })?;

        tracing::debug!(
            scenario = %spec.name,
            alpha = report.regression.alpha,
            beta = report.regression.beta,
            "Scenario evaluated."
        );

        Ok(ScenarioResult {
            name: spec.name.clone(),
            portfolio_return: (stats::compound_growth(&shocked.portfolio) - 1.0) * 100.0,
            benchmark_return: (stats::compound_growth(&shocked.benchmark) - 1.0) * 100.0,
            alpha: report.regression.alpha,
            beta: report.regression.beta,
            sharpe_ratio: report.performance.sharpe_ratio,
            volatility: report.risk.portfolio_volatility,
            max_drawdown: report.risk.max_drawdown,
            advisories: report.advisories,
        })
    }
}

/// Rejects scenarios that cannot produce a meaningful result.
pub fn validate_scenarios(scenarios: &[ScenarioSpec]) -> Result<(), StressError> {
    let mut seen = HashSet::new();
    for spec in scenarios {
        let invalid = |reason: &str| StressError::InvalidScenario {
            name: spec.name.clone(),
            reason: reason.to_string(),
        };

        if spec.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(invalid("name is used by more than one scenario"));
        }
        if !spec.market_shock.is_finite() || spec.market_shock == 0.0 {
            return Err(invalid("market shock must be a finite, non-zero factor"));
        }
        if spec
            .correlation_shock
            .is_some_and(|k| !(-1.0..=1.0).contains(&k))
        {
            return Err(invalid("correlation shock must lie within [-1, 1]"));
        }
        if spec.return_shift.is_some_and(|shift| !shift.is_finite()) {
            return Err(invalid("return shift must be a finite number"));
        }
    }
    Ok(())
}
