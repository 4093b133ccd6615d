use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// The root configuration structure for the analytics engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSettings,
    pub parallelism: Parallelism,
    pub rating: RatingThresholds,
}

impl Config {
    /// Checks that the settings are logically consistent with one another.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()?;
        self.rating.validate()?;
        Ok(())
    }
}

/// Contains the numeric conventions of the return-series pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Rolling window used when a request does not name one.
    pub default_rolling_window: usize,
    /// Shortest series (and shortest rolling window) the engine accepts.
    pub min_observations: usize,
    /// Largest absolute period return, in percent, accepted as sane input.
    pub max_abs_return: f64,
    /// Absolute correlations below this raise a suspicious-correlation advisory.
    pub correlation_floor: f64,
    /// Absolute correlations above this raise a suspicious-correlation advisory.
    pub correlation_ceiling: f64,
    /// Sentinel reported for ratios whose true value is unbounded (e.g. Sortino with no downside).
    pub ratio_cap: f64,
    /// Sentinel reported for ratios that are undefined (e.g. Treynor with zero beta).
    pub undefined_ratio: f64,
    /// Confidence level, in percent, of the parametric value-at-risk.
    pub var_confidence: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_rolling_window: 24,
            min_observations: 12,
            max_abs_return: 100.0,
            correlation_floor: 0.1,
            correlation_ceiling: 0.99,
            ratio_cap: 999.0,
            undefined_ratio: 0.0,
            var_confidence: 95.0,
        }
    }
}

impl AnalysisSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_observations < 3 {
            return Err(ConfigError::ValidationError(
                "analysis.min_observations must be at least 3".to_string(),
            ));
        }
        if self.default_rolling_window < self.min_observations {
            return Err(ConfigError::ValidationError(format!(
                "analysis.default_rolling_window ({}) must be at least min_observations ({})",
                self.default_rolling_window, self.min_observations
            )));
        }
        if !(self.max_abs_return > 0.0) {
            return Err(ConfigError::ValidationError(
                "analysis.max_abs_return must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.correlation_floor)
            || !(0.0..=1.0).contains(&self.correlation_ceiling)
            || self.correlation_floor >= self.correlation_ceiling
        {
            return Err(ConfigError::ValidationError(
                "analysis.correlation_floor must be below correlation_ceiling, both within [0, 1]"
                    .to_string(),
            ));
        }
        if !self.ratio_cap.is_finite() || !self.undefined_ratio.is_finite() {
            return Err(ConfigError::ValidationError(
                "analysis ratio sentinels must be finite".to_string(),
            ));
        }
        if !(self.var_confidence > 50.0 && self.var_confidence < 100.0) {
            return Err(ConfigError::ValidationError(
                "analysis.var_confidence must be within (50, 100)".to_string(),
            ));
        }
        Ok(())
    }
}

/// Controls when independent units of work (windows, scenarios) go to the rayon pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parallelism {
    /// Below this many units the work runs sequentially on the calling thread.
    pub min_parallel_units: usize,
}

impl Default for Parallelism {
    fn default() -> Self {
        Self {
            min_parallel_units: 8,
        }
    }
}

impl Parallelism {
    pub fn should_parallelize(&self, units: usize) -> bool {
        units >= self.min_parallel_units.max(2)
    }
}

/// The rule table that maps numeric results to qualitative ratings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingThresholds {
    pub significance: SignificanceLevels,
    pub performance: PerformanceThresholds,
    pub risk: RiskThresholds,
    pub recommendation: RecommendationRules,
}

impl RatingThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.significance;
        if !(s.highly_significant > s.significant && s.significant > s.marginally_significant)
            || s.marginally_significant <= 0.0
            || s.highly_significant >= 100.0
        {
            return Err(ConfigError::ValidationError(
                "rating.significance levels must be strictly descending within (0, 100)".to_string(),
            ));
        }

        let p = &self.performance;
        if !(p.excellent_sharpe > p.good_sharpe
            && p.good_sharpe > p.average_sharpe
            && p.average_sharpe > p.poor_sharpe)
        {
            return Err(ConfigError::ValidationError(
                "rating.performance Sharpe thresholds must be strictly descending".to_string(),
            ));
        }

        let r = &self.risk;
        if !(r.low > 0.0 && r.low < r.moderate && r.moderate < r.high) {
            return Err(ConfigError::ValidationError(
                "rating.risk thresholds must be positive and strictly ascending".to_string(),
            ));
        }
        Ok(())
    }
}

/// Two-tailed confidence levels, in percent, for the alpha significance buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceLevels {
    pub highly_significant: f64,
    pub significant: f64,
    pub marginally_significant: f64,
}

impl Default for SignificanceLevels {
    fn default() -> Self {
        Self {
            highly_significant: 99.0,
            significant: 95.0,
            marginally_significant: 90.0,
        }
    }
}

/// Annualized Sharpe ratio floors for each performance bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceThresholds {
    /// Requires a positive alpha as well.
    pub excellent_sharpe: f64,
    /// Requires a non-negative alpha as well.
    pub good_sharpe: f64,
    pub average_sharpe: f64,
    pub poor_sharpe: f64,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            excellent_sharpe: 1.0,
            good_sharpe: 0.5,
            average_sharpe: 0.0,
            poor_sharpe: -0.5,
        }
    }
}

/// Ceilings on relative volatility (portfolio / benchmark) and on |beta| per risk bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 0.8,
            moderate: 1.1,
            high: 1.5,
        }
    }
}

/// Score penalties subtracted from the performance score for each risk bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationRules {
    pub low_risk_penalty: i32,
    pub moderate_risk_penalty: i32,
    pub high_risk_penalty: i32,
    pub very_high_risk_penalty: i32,
}

impl Default for RecommendationRules {
    fn default() -> Self {
        Self {
            low_risk_penalty: 0,
            moderate_risk_penalty: 0,
            high_risk_penalty: 1,
            very_high_risk_penalty: 2,
        }
    }
}
