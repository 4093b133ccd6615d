use crate::attribution::{Attribution, BenchmarkComparison};
use crate::performance::PerformanceMetrics;
use crate::regression::RegressionResult;
use crate::risk::RiskMetrics;
use core_types::Advisory;
use serde::{Deserialize, Serialize};

/// Everything a single pass over one pair of series produces.
///
/// This is the output of the `AnalyticsEngine` and the unit the rolling and stress layers
/// build on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub regression: RegressionResult,
    pub risk: RiskMetrics,
    pub performance: PerformanceMetrics,
    pub attribution: Attribution,
    pub benchmark_comparison: BenchmarkComparison,
    /// Non-fatal conditions raised while validating and computing, in the order raised.
    pub advisories: Vec<Advisory>,
}

/// The reduced result of a single rolling window: the regression plus the Sharpe ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSnapshot {
    pub regression: RegressionResult,
    pub sharpe_ratio: f64,
    pub advisories: Vec<Advisory>,
}
