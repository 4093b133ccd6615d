use crate::enums::AnalysisPeriod;
use serde::{Deserialize, Serialize};

fn default_confidence_level() -> f64 {
    95.0
}

/// The input record handed to the engine by the calculator layer.
///
/// Returns are period percentages (`1.5` means 1.5%). The risk-free rate is annualized,
/// also in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub portfolio_returns: Vec<f64>,
    pub benchmark_returns: Vec<f64>,
    /// Optional market factor. When present it replaces the benchmark as the regressor.
    #[serde(default)]
    pub market_returns: Option<Vec<f64>>,
    #[serde(default)]
    pub risk_free_rate: f64,
    #[serde(default)]
    pub analysis_period: AnalysisPeriod,
    /// Two-tailed confidence level in percent, between 80 and 99.9.
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default)]
    pub rolling_window: Option<usize>,
    #[serde(default)]
    pub stress_test_scenarios: Option<Vec<ScenarioSpec>>,
}

impl AnalysisRequest {
    /// Creates a request with a zero risk-free rate, monthly data and 95% confidence.
    pub fn new(portfolio_returns: Vec<f64>, benchmark_returns: Vec<f64>) -> Self {
        Self {
            portfolio_returns,
            benchmark_returns,
            market_returns: None,
            risk_free_rate: 0.0,
            analysis_period: AnalysisPeriod::default(),
            confidence_level: default_confidence_level(),
            rolling_window: None,
            stress_test_scenarios: None,
        }
    }

    pub fn with_market_returns(mut self, market_returns: Vec<f64>) -> Self {
        self.market_returns = Some(market_returns);
        self
    }

    pub fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub fn with_period(mut self, analysis_period: AnalysisPeriod) -> Self {
        self.analysis_period = analysis_period;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_rolling_window(mut self, rolling_window: usize) -> Self {
        self.rolling_window = Some(rolling_window);
        self
    }

    pub fn with_scenarios(mut self, scenarios: Vec<ScenarioSpec>) -> Self {
        self.stress_test_scenarios = Some(scenarios);
        self
    }
}

/// A named, deterministic shock applied to a copy of the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSpec {
    pub name: String,
    /// Multiplicative factor applied to every return of both series (1.2 = +20%).
    pub market_shock: f64,
    /// Blends the benchmark toward (+) or away from (-) the portfolio, within [-1, 1].
    /// A market series, when present, is blended the same way.
    #[serde(default)]
    pub correlation_shock: Option<f64>,
    /// Additive per-period shift in percent, applied after scaling.
    #[serde(default)]
    pub return_shift: Option<f64>,
}

impl ScenarioSpec {
    pub fn new(name: impl Into<String>, market_shock: f64) -> Self {
        Self {
            name: name.into(),
            market_shock,
            correlation_shock: None,
            return_shift: None,
        }
    }

    pub fn with_correlation_shock(mut self, correlation_shock: f64) -> Self {
        self.correlation_shock = Some(correlation_shock);
        self
    }

    pub fn with_return_shift(mut self, return_shift: f64) -> Self {
        self.return_shift = Some(return_shift);
        self
    }
}

/// A two-sided interval around a point estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn around(estimate: f64, margin: f64) -> Self {
        Self {
            lower: estimate - margin,
            upper: estimate + margin,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
