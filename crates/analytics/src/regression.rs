use crate::error::AnalyticsError;
use crate::params::AnalysisParams;
use crate::stats::{self, VARIANCE_EPSILON};
use core_types::{ConfidenceInterval, SeriesKind};
use serde::{Deserialize, Serialize};

/// Single-factor (CAPM) regression of portfolio excess returns on factor excess returns.
///
/// Created once per input tuple and never mutated; a new computation yields a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegressionResult {
    /// Intercept, per period, in percent.
    pub alpha: f64,
    /// Intercept scaled to one year.
    pub alpha_annualized: f64,
    pub beta: f64,
    pub r_squared: f64,
    pub correlation: f64,
    /// Standard error of the intercept, per period, in percent.
    pub standard_error: f64,
    /// Standard error of the slope.
    pub beta_standard_error: f64,
    pub t_statistic: f64,
    pub p_value: f64,
    pub confidence_interval: ConfidenceInterval,
    pub confidence_level: f64,
    pub degrees_of_freedom: usize,
    pub observations: usize,
}

/// Runs the ordinary-least-squares fit.
///
/// The intercept standard error is `s * sqrt(1/n + mean(b)^2 / Sxx)` where `s` is the
/// residual standard deviation. When it is zero (a perfect fit) the t-statistic is reported
/// as 0 and the p-value as 1.
pub fn regress(
    portfolio: &[f64],
    factor: &[f64],
    params: &AnalysisParams,
) -> Result<RegressionResult, AnalyticsError> {
    let n = portfolio.len();
    if factor.len() != n {
        return Err(AnalyticsError::LengthMismatch {
            series: SeriesKind::Benchmark,
            expected: n,
            actual: factor.len(),
        });
    }
    if n <= 2 {
        return Err(AnalyticsError::InsufficientDegreesOfFreedom { observations: n });
    }
    let degrees_of_freedom = n - 2;
    let nf = n as f64;

    // 1-2. Excess returns over the per-period risk-free rate.
    let rf = params.risk_free_per_period();
    let portfolio_excess: Vec<f64> = portfolio.iter().map(|r| r - rf).collect();
    let factor_excess: Vec<f64> = factor.iter().map(|r| r - rf).collect();

    let mean_p = stats::mean(&portfolio_excess);
    let mean_b = stats::mean(&factor_excess);

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (p, b) in portfolio_excess.iter().zip(&factor_excess) {
        let (dp, db) = (p - mean_p, b - mean_b);
        sxx += db * db;
        sxy += dp * db;
        syy += dp * dp;
    }

    // 3. Slope. A flat factor leaves beta undefined.
    let factor_variance = sxx / (nf - 1.0);
    if factor_variance < VARIANCE_EPSILON {
        return Err(AnalyticsError::DegenerateBenchmark {
            variance: factor_variance,
        });
    }
    let beta = sxy / sxx;

    // 4. Intercept.
    let alpha = mean_p - beta * mean_b;

    // 5. Goodness of fit.
    let correlation = if syy / (nf - 1.0) < VARIANCE_EPSILON {
        0.0
    } else {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    };
    let r_squared = correlation * correlation;

    // 6. Residual dispersion.
    let sse: f64 = portfolio_excess
        .iter()
        .zip(&factor_excess)
        .map(|(p, b)| {
            let e = p - (alpha + beta * b);
            e * e
        })
        .sum();
    let residual_variance = sse / degrees_of_freedom as f64;
    let beta_standard_error = residual_variance.sqrt() / sxx.sqrt();
    let standard_error = (residual_variance * (1.0 / nf + mean_b * mean_b / sxx)).sqrt();

    // 7. Significance of alpha.
    let t_statistic = if standard_error > VARIANCE_EPSILON {
        alpha / standard_error
    } else {
        0.0
    };
    let p_value = stats::two_tailed_p_value(t_statistic, degrees_of_freedom)?;

    // 8. Confidence band around alpha.
    let critical = stats::critical_value(params.confidence_level(), degrees_of_freedom)?;
    let confidence_interval = ConfidenceInterval::around(alpha, critical * standard_error);

    tracing::debug!(
        n,
        alpha,
        beta,
        r_squared,
        t_statistic,
        p_value,
        "Regression fitted."
    );

    Ok(RegressionResult {
        alpha,
        alpha_annualized: alpha * params.periods_per_year(),
        beta,
        r_squared,
        correlation,
        standard_error,
        beta_standard_error,
        t_statistic,
        p_value,
        confidence_interval,
        confidence_level: params.confidence_level(),
        degrees_of_freedom,
        observations: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use core_types::AnalysisPeriod;
    use proptest::prelude::*;

    const PORTFOLIO: [f64; 12] = [2.1, -1.5, 3.2, 0.8, 1.9, 2.5, -0.8, 1.2, 2.8, 0.5, 1.6, 2.3];
    const BENCHMARK: [f64; 12] = [1.8, -2.1, 2.9, 0.5, 1.6, 2.1, -1.2, 0.8, 2.2, 0.3, 1.2, 1.9];

    fn params(risk_free_rate: f64) -> AnalysisParams {
        AnalysisParams::new(AnalysisPeriod::Monthly, risk_free_rate, 95.0).unwrap()
    }

    #[test]
    fn self_regression_is_the_identity() {
        let result = regress(&PORTFOLIO, &PORTFOLIO, &params(2.5)).unwrap();
        assert_relative_eq!(result.beta, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(result.alpha, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(result.correlation, 1.0, epsilon = 1e-12);
        assert_eq!(result.t_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn reference_example_has_a_plausible_beta() {
        let result = regress(&PORTFOLIO, &BENCHMARK, &params(2.5)).unwrap();
        assert!(result.beta > 0.9 && result.beta < 1.3, "beta = {}", result.beta);
        assert!((0.0..=1.0).contains(&result.r_squared));
        assert!((0.0..=1.0).contains(&result.p_value));
        assert_eq!(result.degrees_of_freedom, 10);
        assert!(result.confidence_interval.contains(result.alpha));
        assert_relative_eq!(result.alpha_annualized, result.alpha * 12.0, epsilon = 1e-12);
    }

    #[test]
    fn recovers_a_known_line() {
        // p = 0.5 + 1.5 * b exactly, with a zero risk-free rate.
        let benchmark: Vec<f64> = (0..20).map(|i| (i as f64 * 0.9).cos() * 2.0).collect();
        let portfolio: Vec<f64> = benchmark.iter().map(|b| 0.5 + 1.5 * b).collect();
        let result = regress(&portfolio, &benchmark, &params(0.0)).unwrap();
        assert_relative_eq!(result.alpha, 0.5, epsilon = 1e-10);
        assert_relative_eq!(result.beta, 1.5, epsilon = 1e-10);
        assert_abs_diff_eq!(result.beta_standard_error, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn wider_confidence_widens_the_interval() {
        let narrow = regress(&PORTFOLIO, &BENCHMARK, &params(2.5)).unwrap();
        let wide = regress(
            &PORTFOLIO,
            &BENCHMARK,
            &AnalysisParams::new(AnalysisPeriod::Monthly, 2.5, 99.0).unwrap(),
        )
        .unwrap();
        assert!(wide.confidence_interval.width() > narrow.confidence_interval.width());
    }

    #[test]
    fn flat_benchmark_is_degenerate() {
        let flat = [1.0; 12];
        let result = regress(&PORTFOLIO, &flat, &params(2.5));
        assert!(matches!(result, Err(AnalyticsError::DegenerateBenchmark { .. })));
    }

    #[test]
    fn two_points_have_no_degrees_of_freedom() {
        let result = regress(&[1.0, 2.0], &[0.5, 1.0], &params(0.0));
        assert_eq!(
            result,
            Err(AnalyticsError::InsufficientDegreesOfFreedom { observations: 2 })
        );
    }

    proptest! {
        #[test]
        fn scaling_both_series_preserves_slope_and_fit(
            pairs in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 12..40),
            scale in 0.1f64..5.0,
        ) {
            let portfolio: Vec<f64> = pairs.iter().map(|(p, _)| *p).collect();
            let benchmark: Vec<f64> = pairs.iter().map(|(_, b)| *b).collect();
            prop_assume!(stats::sample_variance(&benchmark) > 1e-3);
            prop_assume!(stats::sample_variance(&portfolio) > 1e-3);

            let base = regress(&portfolio, &benchmark, &params(0.0)).unwrap();
            let scaled_p: Vec<f64> = portfolio.iter().map(|r| r * scale).collect();
            let scaled_b: Vec<f64> = benchmark.iter().map(|r| r * scale).collect();
            let scaled = regress(&scaled_p, &scaled_b, &params(0.0)).unwrap();

            prop_assert!((base.beta - scaled.beta).abs() < 1e-8);
            prop_assert!((base.correlation - scaled.correlation).abs() < 1e-8);
            prop_assert!((base.r_squared - scaled.r_squared).abs() < 1e-8);
            prop_assert!((base.alpha * scale - scaled.alpha).abs() < 1e-8);
        }

        #[test]
        fn statistics_stay_in_bounds(
            pairs in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 12..60),
            risk_free_rate in -2.0f64..10.0,
        ) {
            let portfolio: Vec<f64> = pairs.iter().map(|(p, _)| *p).collect();
            let benchmark: Vec<f64> = pairs.iter().map(|(_, b)| *b).collect();
            prop_assume!(stats::sample_variance(&benchmark) > 1e-3);

            let result = regress(&portfolio, &benchmark, &params(risk_free_rate)).unwrap();
            prop_assert!((0.0..=1.0).contains(&result.r_squared));
            prop_assert!(result.correlation.abs() <= 1.0);
            prop_assert!((0.0..=1.0).contains(&result.p_value));
        }
    }
}
