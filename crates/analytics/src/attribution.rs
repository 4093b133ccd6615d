use crate::params::AnalysisParams;
use crate::performance::{self, PerformanceMetrics};
use crate::regression::RegressionResult;
use crate::risk::RiskMetrics;
use crate::stats;
use serde::{Deserialize, Serialize};

/// Splits the annualized return and volatility into the part explained by factor exposure
/// and the part the manager is responsible for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    /// Annualized alpha, in percent.
    pub alpha_contribution: f64,
    /// Beta times the annualized mean factor excess return, in percent.
    pub beta_contribution: f64,
    pub systematic_volatility: f64,
    pub idiosyncratic_volatility: f64,
    /// Mean per-period active return over the benchmark.
    pub selection_effect: f64,
}

impl Attribution {
    pub fn compute(
        factor: &[f64],
        regression: &RegressionResult,
        risk: &RiskMetrics,
        performance: &PerformanceMetrics,
        params: &AnalysisParams,
    ) -> Self {
        let factor_excess = stats::mean(factor) - params.risk_free_per_period();
        Self {
            alpha_contribution: regression.alpha_annualized,
            beta_contribution: regression.beta * factor_excess * params.periods_per_year(),
            systematic_volatility: regression.beta.abs() * risk.factor_volatility,
            idiosyncratic_volatility: risk.idiosyncratic_risk.max(0.0).sqrt(),
            selection_effect: performance.excess_return,
        }
    }
}

/// One measure reported for both series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonLine {
    pub portfolio: f64,
    pub benchmark: f64,
    /// Portfolio minus benchmark.
    pub difference: f64,
}

impl ComparisonLine {
    pub fn new(portfolio: f64, benchmark: f64) -> Self {
        Self {
            portfolio,
            benchmark,
            difference: portfolio - benchmark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub annualized_return: ComparisonLine,
    pub volatility: ComparisonLine,
    pub sharpe_ratio: ComparisonLine,
}

impl BenchmarkComparison {
    pub fn compute(
        benchmark: &[f64],
        risk: &RiskMetrics,
        performance: &PerformanceMetrics,
        params: &AnalysisParams,
    ) -> Self {
        let benchmark_annualized = performance::annualized_return(
            stats::compound_growth(benchmark),
            benchmark.len(),
            params.periods_per_year(),
        );
        Self {
            annualized_return: ComparisonLine::new(performance.annualized_return, benchmark_annualized),
            volatility: ComparisonLine::new(risk.portfolio_volatility, risk.benchmark_volatility),
            sharpe_ratio: ComparisonLine::new(
                performance.sharpe_ratio,
                performance.benchmark_sharpe_ratio,
            ),
        }
    }
}
