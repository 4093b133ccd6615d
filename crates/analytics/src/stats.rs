//! Descriptive statistics and Student-t inference shared by every component.
//!
//! All functions work on period returns expressed in percent. Sample statistics use the
//! `n - 1` denominator.

use crate::error::AnalyticsError;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Variances below this are treated as exactly zero.
pub const VARIANCE_EPSILON: f64 = 1e-12;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations from the mean.
pub fn sum_of_squares(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum()
}

pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    sum_of_squares(values) / (values.len() - 1) as f64
}

pub fn sample_std_dev(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

pub fn covariance(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (mx, my) = (mean(&xs[..n]), mean(&ys[..n]));
    let cross: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    cross / (n - 1) as f64
}

/// Pearson correlation, or 0.0 when either series is flat.
pub fn correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let (vx, vy) = (sample_variance(xs), sample_variance(ys));
    if vx < VARIANCE_EPSILON || vy < VARIANCE_EPSILON {
        return 0.0;
    }
    (covariance(xs, ys) / (vx * vy).sqrt()).clamp(-1.0, 1.0)
}

/// Growth of one unit invested over the whole series.
pub fn compound_growth(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r / 100.0))
}

/// Largest peak-to-trough decline of the compounded path, in percent of the running peak.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut peak = 1.0_f64;
    let mut cumulative = 1.0_f64;
    let mut max_drawdown = 0.0_f64;

    for r in returns {
        cumulative *= 1.0 + r / 100.0;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = (peak - cumulative) / peak;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    max_drawdown * 100.0
}

fn students_t(degrees_of_freedom: usize) -> Result<StudentsT, AnalyticsError> {
    if degrees_of_freedom == 0 {
        return Err(AnalyticsError::Distribution(
            "Student-t requires at least one degree of freedom".to_string(),
        ));
    }
    StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
        .map_err(|e| AnalyticsError::Distribution(e.to_string()))
}

/// Two-tailed p-value of a t-statistic, from the exact Student-t CDF.
pub fn two_tailed_p_value(t_statistic: f64, degrees_of_freedom: usize) -> Result<f64, AnalyticsError> {
    let dist = students_t(degrees_of_freedom)?;
    if t_statistic.is_nan() {
        return Ok(1.0);
    }
    if t_statistic.is_infinite() {
        return Ok(0.0);
    }
    Ok((2.0 * dist.sf(t_statistic.abs())).clamp(0.0, 1.0))
}

/// The |t| above which a two-tailed test rejects at `confidence_pct` percent.
pub fn critical_value(confidence_pct: f64, degrees_of_freedom: usize) -> Result<f64, AnalyticsError> {
    if !(confidence_pct > 0.0 && confidence_pct < 100.0) {
        return Err(AnalyticsError::InvalidParameter {
            name: "confidence_level".to_string(),
            reason: format!("{} is not within (0, 100)", confidence_pct),
        });
    }
    let dist = students_t(degrees_of_freedom)?;
    let tail = (1.0 - confidence_pct / 100.0) / 2.0;
    Ok(dist.inverse_cdf(1.0 - tail))
}

/// One-sided standard normal quantile at `confidence_pct` percent.
pub fn normal_quantile(confidence_pct: f64) -> Result<f64, AnalyticsError> {
    let normal = Normal::new(0.0, 1.0).map_err(|e| AnalyticsError::Distribution(e.to_string()))?;
    Ok(normal.inverse_cdf(confidence_pct / 100.0))
}
