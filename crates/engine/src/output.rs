use analytics::{Attribution, BenchmarkComparison, PerformanceMetrics, RegressionResult, RiskMetrics};
use core_types::Advisory;
use rating::{QualityAssessment, Rating};
use rolling::RollingSeries;
use serde::{Deserialize, Serialize};
use stress::ScenarioResult;

/// The complete result of one analysis request.
///
/// Every field is a plain value; the record serializes to the same camelCase shape as the
/// request it answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    pub regression: RegressionResult,
    pub risk: RiskMetrics,
    pub performance: PerformanceMetrics,
    pub attribution: Attribution,
    pub benchmark_comparison: BenchmarkComparison,
    /// `None` when the series was too short for the implicit window; see `advisories`.
    pub rolling: Option<RollingSeries>,
    pub scenarios: Vec<ScenarioResult>,
    pub rating: Rating,
    pub quality: QualityAssessment,
    /// Advisories raised by the main pass. Rolling and scenario advisories travel with
    /// their own results.
    pub advisories: Vec<Advisory>,
}
