//! # Alpha/Beta Engine
//!
//! The library boundary of the workspace: one call takes an `AnalysisRequest` through
//! validation, the main analytics pass, rolling analysis, stress scenarios and rating, and
//! returns an `AnalysisOutput`.
//!
//! The engine holds no state between calls. Fatal conditions are returned as `EngineError`
//! before any partial output exists; everything else is reported as an advisory.

use analytics::{AnalysisParams, AnalyticsEngine, ValidatedSeries};
use configuration::Config;
use core_types::{AnalysisRequest, ScenarioSpec};
use rating::{QualityAssessment, RatingEngine};
use rolling::{CancellationToken, RollingAnalyzer, RollingSeries, WindowPlan};
use stress::{ScenarioResult, ScenarioTester};

pub mod error;
pub mod output;

pub use error::EngineError;
pub use output::AnalysisOutput;

/// The central orchestrator for an analysis request.
#[derive(Debug, Clone)]
pub struct AlphaBetaEngine {
    config: Config,
    rating_engine: RatingEngine,
}

impl AlphaBetaEngine {
    /// Creates an engine from a configuration, rejecting inconsistent settings.
    pub fn new(config: Config) -> Result<Self, EngineError> {
        config.validate()?;
        let rating_engine = RatingEngine::new(config.rating.clone());
        Ok(Self {
            config,
            rating_engine,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisOutput, EngineError> {
        self.analyze_with_cancellation(request, &CancellationToken::new())
    }

    /// Like [`AlphaBetaEngine::analyze`], with a token the caller can use to abandon a long
    /// rolling run.
    #[tracing::instrument(
        name = "analyze",
        skip_all,
        fields(observations = request.portfolio_returns.len(), period = %request.analysis_period)
    )]
    pub fn analyze_with_cancellation(
        &self,
        request: &AnalysisRequest,
        token: &CancellationToken,
    ) -> Result<AnalysisOutput, EngineError> {
        // 1. Check everything that can fail cheaply before doing any work.
        let params = AnalysisParams::from_request(request)?;
        let analytics = AnalyticsEngine::new(self.config.analysis.clone(), params);
        let series = analytics.validate(
            &request.portfolio_returns,
            &request.benchmark_returns,
            request.market_returns.as_deref(),
        )?;
        let plan = rolling::plan_window(request.rolling_window, series.len(), &self.config.analysis)?;
        let scenarios = request
            .stress_test_scenarios
            .clone()
            .unwrap_or_else(stress::default_scenarios);
        stress::validate_scenarios(&scenarios)?;

        // 2. The main pass.
        let report = analytics.calculate_validated(&series)?;
        tracing::info!(
            alpha = report.regression.alpha,
            beta = report.regression.beta,
            sharpe_ratio = report.performance.sharpe_ratio,
            "Main analysis pass complete."
        );

        // 3. Rolling windows and scenarios are independent of each other.
        let (rolling, scenarios) = rayon::join(
            || self.run_rolling(&analytics, &series, &plan, token),
            || self.run_scenarios(&analytics, &series, &scenarios),
        );
        let rolling = rolling?;
        let scenarios = scenarios?;

        // 4. Rating and quality depend only on the main pass.
        let rating = self
            .rating_engine
            .rate(&report.regression, &report.risk, &report.performance)?;
        let quality = QualityAssessment::assess(&series, &report.regression);

        let mut advisories = report.advisories;
        if let WindowPlan::Skip(advisory) = plan {
            advisories.push(advisory);
        }
        for advisory in &advisories {
            tracing::warn!(%advisory, "Analysis advisory.");
        }
        for advisory in rolling.iter().flat_map(|series| &series.advisories) {
            tracing::warn!(%advisory, "Rolling window advisory.");
        }
        for result in &scenarios {
            for advisory in &result.advisories {
                tracing::warn!(scenario = %result.name, %advisory, "Scenario advisory.");
            }
        }

        Ok(AnalysisOutput {
            regression: report.regression,
            risk: report.risk,
            performance: report.performance,
            attribution: report.attribution,
            benchmark_comparison: report.benchmark_comparison,
            rolling,
            scenarios,
            rating,
            quality,
            advisories,
        })
    }

    fn run_rolling(
        &self,
        analytics: &AnalyticsEngine,
        series: &ValidatedSeries,
        plan: &WindowPlan,
        token: &CancellationToken,
    ) -> Result<Option<RollingSeries>, EngineError> {
        match plan {
            WindowPlan::Run(window) => {
                let analyzer =
                    RollingAnalyzer::new(analytics, series, *window, self.config.parallelism.clone())?;
                Ok(Some(analyzer.run(token)?))
            }
            WindowPlan::Skip(_) => Ok(None),
        }
    }

    fn run_scenarios(
        &self,
        analytics: &AnalyticsEngine,
        series: &ValidatedSeries,
        scenarios: &[ScenarioSpec],
    ) -> Result<Vec<ScenarioResult>, EngineError> {
        let tester = ScenarioTester::new(analytics, self.config.parallelism.clone());
        Ok(tester.run(series, scenarios)?)
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self {
            config: Config::default(),
            rating_engine: RatingEngine::default(),
        }
    }
}
