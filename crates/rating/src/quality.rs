use analytics::{RegressionResult, ValidatedSeries};
use serde::{Deserialize, Serialize};

/// Heuristic scores (0-100) describing how much weight the results can bear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    pub data_quality: f64,
    pub model_accuracy: f64,
    pub confidence_score: f64,
}

impl QualityAssessment {
    pub fn assess(series: &ValidatedSeries, regression: &RegressionResult) -> Self {
        let largest_move = series
            .portfolio()
            .iter()
            .chain(series.benchmark())
            .chain(series.market().unwrap_or_default())
            .fold(0.0_f64, |acc, r| acc.max(r.abs()));
        Self::from_parts(
            series.len(),
            largest_move,
            regression.r_squared,
            regression.p_value,
        )
    }

    /// `largest_move` is the largest absolute period return across all input series.
    pub fn from_parts(observations: usize, largest_move: f64, r_squared: f64, p_value: f64) -> Self {
        let mut data_quality = 80.0;
        if observations < 24 {
            data_quality -= 20.0;
        }
        if observations < 12 {
            data_quality -= 30.0;
        }
        if largest_move > 50.0 {
            data_quality -= 10.0;
        }
        let data_quality = f64::clamp(data_quality, 50.0, 100.0);

        let mut model_accuracy = 70.0 + 20.0 * r_squared;
        if observations > 60 {
            model_accuracy += 10.0;
        }
        if observations > 120 {
            model_accuracy += 5.0;
        }
        let model_accuracy = f64::clamp(model_accuracy, 60.0, 95.0);

        let mut confidence_score = 70.0;
        if p_value < 0.01 {
            confidence_score += 20.0;
        } else if p_value < 0.05 {
            confidence_score += 15.0;
        } else if p_value < 0.10 {
            confidence_score += 10.0;
        }
        confidence_score += 0.3 * (data_quality - 70.0);
        let confidence_score = f64::clamp(confidence_score, 50.0, 95.0);

        Self {
            data_quality,
            model_accuracy,
            confidence_score,
        }
    }
}
