use crate::error::AnalyticsError;
use core_types::{AnalysisPeriod, AnalysisRequest};

/// Lowest and highest accepted confidence levels, in percent.
pub const CONFIDENCE_RANGE: (f64, f64) = (80.0, 99.9);

/// The per-request conventions every calculation shares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    period: AnalysisPeriod,
    risk_free_rate: f64,
    confidence_level: f64,
}

impl AnalysisParams {
    /// # Arguments
    ///
    /// * `period` - Sampling frequency of the return series.
    /// * `risk_free_rate` - Annualized risk-free rate in percent.
    /// * `confidence_level` - Two-tailed confidence level in percent, within [80, 99.9].
    pub fn new(
        period: AnalysisPeriod,
        risk_free_rate: f64,
        confidence_level: f64,
    ) -> Result<Self, AnalyticsError> {
        if !risk_free_rate.is_finite() {
            return Err(AnalyticsError::InvalidParameter {
                name: "risk_free_rate".to_string(),
                reason: "must be a finite number".to_string(),
            });
        }
        let (low, high) = CONFIDENCE_RANGE;
        if !(low..=high).contains(&confidence_level) {
            return Err(AnalyticsError::InvalidParameter {
                name: "confidence_level".to_string(),
                reason: format!("{} is outside [{}, {}]", confidence_level, low, high),
            });
        }
        Ok(Self {
            period,
            risk_free_rate,
            confidence_level,
        })
    }

    pub fn from_request(request: &AnalysisRequest) -> Result<Self, AnalyticsError> {
        Self::new(
            request.analysis_period,
            request.risk_free_rate,
            request.confidence_level,
        )
    }

    pub fn period(&self) -> AnalysisPeriod {
        self.period
    }

    pub fn periods_per_year(&self) -> f64 {
        f64::from(self.period.periods_per_year())
    }

    /// Annualized risk-free rate, in percent.
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Risk-free rate for a single period, in percent.
    pub fn risk_free_per_period(&self) -> f64 {
        self.period.per_period_rate(self.risk_free_rate)
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }
}
