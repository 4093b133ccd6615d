//! # Rating Engine
//!
//! Maps final scalar metrics to qualitative ratings through the configurable rule table in
//! `configuration::RatingThresholds`. There are no learned parameters: identical inputs
//! always produce identical ratings.

use analytics::{PerformanceMetrics, RegressionResult, RiskMetrics, stats};
use configuration::RatingThresholds;
use serde::{Deserialize, Serialize};

pub mod enums;
pub mod error;
pub mod quality;

pub use enums::{AlphaSignificance, PerformanceRating, Recommendation, RiskRating};
pub use error::RatingError;
pub use quality::QualityAssessment;

/// The qualitative verdict on one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub alpha_significance: AlphaSignificance,
    pub performance_rating: PerformanceRating,
    pub risk_rating: RiskRating,
    pub recommendation: Recommendation,
}

#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    thresholds: RatingThresholds,
}

impl RatingEngine {
    pub fn new(thresholds: RatingThresholds) -> Self {
        Self { thresholds }
    }

    pub fn rate(
        &self,
        regression: &RegressionResult,
        risk: &RiskMetrics,
        performance: &PerformanceMetrics,
    ) -> Result<Rating, RatingError> {
        let alpha_significance =
            self.classify_significance(regression.t_statistic, regression.degrees_of_freedom)?;
        let performance_rating = self.classify_performance(performance.sharpe_ratio, regression.alpha);
        let relative_volatility = if risk.benchmark_volatility > stats::VARIANCE_EPSILON {
            Some(risk.portfolio_volatility / risk.benchmark_volatility)
        } else {
            None
        };
        let risk_rating = self.classify_risk(relative_volatility, regression.beta);
        let recommendation = self.recommend(performance_rating, risk_rating);

        tracing::debug!(
            %alpha_significance,
            %performance_rating,
            %risk_rating,
            %recommendation,
            "Rating complete."
        );

        Ok(Rating {
            alpha_significance,
            performance_rating,
            risk_rating,
            recommendation,
        })
    }

    /// Compares `|t|` against the two-tailed Student-t critical values of each level.
    pub fn classify_significance(
        &self,
        t_statistic: f64,
        degrees_of_freedom: usize,
    ) -> Result<AlphaSignificance, RatingError> {
        let levels = &self.thresholds.significance;
        let t = t_statistic.abs();

        let significance = if t > stats::critical_value(levels.highly_significant, degrees_of_freedom)? {
            AlphaSignificance::HighlySignificant
        } else if t > stats::critical_value(levels.significant, degrees_of_freedom)? {
            AlphaSignificance::Significant
        } else if t > stats::critical_value(levels.marginally_significant, degrees_of_freedom)? {
            AlphaSignificance::MarginallySignificant
        } else {
            AlphaSignificance::NotSignificant
        };
        Ok(significance)
    }

    /// Buckets on the Sharpe ratio. The top two buckets also require a non-negative alpha
    /// (positive for Excellent), so a negative alpha caps the rating at Average.
    pub fn classify_performance(&self, sharpe_ratio: f64, alpha: f64) -> PerformanceRating {
        let p = &self.thresholds.performance;
        if sharpe_ratio >= p.excellent_sharpe && alpha > 0.0 {
            PerformanceRating::Excellent
        } else if sharpe_ratio >= p.good_sharpe && alpha >= 0.0 {
            PerformanceRating::Good
        } else if sharpe_ratio >= p.average_sharpe {
            PerformanceRating::Average
        } else if sharpe_ratio >= p.poor_sharpe {
            PerformanceRating::Poor
        } else {
            PerformanceRating::VeryPoor
        }
    }

    /// The worse of the relative-volatility and `|beta|` buckets. Relative volatility is
    /// `None` when the benchmark has no volatility, and only beta decides.
    pub fn classify_risk(&self, relative_volatility: Option<f64>, beta: f64) -> RiskRating {
        let by_beta = self.risk_bucket(beta.abs());
        match relative_volatility {
            Some(ratio) => self.risk_bucket(ratio).max(by_beta),
            None => by_beta,
        }
    }

    pub fn recommend(&self, performance: PerformanceRating, risk: RiskRating) -> Recommendation {
        let rules = &self.thresholds.recommendation;
        let penalty = match risk {
            RiskRating::Low => rules.low_risk_penalty,
            RiskRating::Moderate => rules.moderate_risk_penalty,
            RiskRating::High => rules.high_risk_penalty,
            RiskRating::VeryHigh => rules.very_high_risk_penalty,
        };
        Recommendation::from_score(performance.score() - penalty)
    }

    fn risk_bucket(&self, value: f64) -> RiskRating {
        let r = &self.thresholds.risk;
        if value <= r.low {
            RiskRating::Low
        } else if value <= r.moderate {
            RiskRating::Moderate
        } else if value <= r.high {
            RiskRating::High
        } else {
            RiskRating::VeryHigh
        }
    }
}
