use crate::error::AnalyticsError;
use crate::params::AnalysisParams;
use crate::stats;
use configuration::AnalysisSettings;
use core_types::Advisory;
use serde::{Deserialize, Serialize};

/// Dispersion and loss measures. Volatilities are annualized, in percent;
/// `systematic_risk`, `idiosyncratic_risk` are variances (percent squared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub portfolio_volatility: f64,
    pub benchmark_volatility: f64,
    /// Volatility of the regression factor: the market series when one is supplied,
    /// otherwise the benchmark.
    pub factor_volatility: f64,
    pub tracking_error: f64,
    pub systematic_risk: f64,
    pub idiosyncratic_risk: f64,
    /// Equal to the portfolio volatility.
    pub total_risk: f64,
    /// Annualized root-mean-square shortfall below the per-period risk-free rate.
    pub downside_deviation: f64,
    /// Worst peak-to-trough decline of the compounded portfolio path, in percent.
    pub max_drawdown: f64,
    /// Parametric value-at-risk: annualized volatility times the normal quantile.
    pub value_at_risk: f64,
}

impl RiskMetrics {
    /// Derives the risk profile of `portfolio` against `benchmark`. The systematic/idiosyncratic
    /// split uses the regression `beta` together with the `factor` it was estimated against.
    pub fn compute(
        portfolio: &[f64],
        benchmark: &[f64],
        factor: &[f64],
        beta: f64,
        params: &AnalysisParams,
        settings: &AnalysisSettings,
        advisories: &mut Vec<Advisory>,
    ) -> Result<Self, AnalyticsError> {
        let scale = params.period().volatility_scale();

        let portfolio_volatility = stats::sample_std_dev(portfolio) * scale;
        let benchmark_volatility = stats::sample_std_dev(benchmark) * scale;
        let factor_volatility = stats::sample_std_dev(factor) * scale;

        let active: Vec<f64> = portfolio.iter().zip(benchmark).map(|(p, b)| p - b).collect();
        let tracking_error = stats::sample_std_dev(&active) * scale;

        // Risk decomposition: total variance = systematic + idiosyncratic.
        let total_risk = portfolio_volatility;
        let systematic_risk = beta * beta * factor_volatility * factor_volatility;
        let mut idiosyncratic_risk = total_risk * total_risk - systematic_risk;
        if idiosyncratic_risk < 0.0 {
            tracing::debug!(idiosyncratic_risk, "Negative idiosyncratic risk clamped to zero.");
            advisories.push(Advisory::RiskDecompositionWarning {
                shortfall: -idiosyncratic_risk,
            });
            idiosyncratic_risk = 0.0;
        }

        let downside_deviation = downside_deviation(portfolio, params);
        let max_drawdown = stats::max_drawdown(portfolio);
        let value_at_risk = stats::normal_quantile(settings.var_confidence)? * portfolio_volatility;

        Ok(Self {
            portfolio_volatility,
            benchmark_volatility,
            factor_volatility,
            tracking_error,
            systematic_risk,
            idiosyncratic_risk,
            total_risk,
            downside_deviation,
            max_drawdown,
            value_at_risk,
        })
    }
}

/// Annualized downside deviation with the per-period risk-free rate as target.
/// Zero when no observation falls below the target.
pub fn downside_deviation(returns: &[f64], params: &AnalysisParams) -> f64 {
    let target = params.risk_free_per_period();
    let shortfalls: Vec<f64> = returns
        .iter()
        .filter(|r| **r < target)
        .map(|r| (r - target) * (r - target))
        .collect();
    if shortfalls.is_empty() {
        return 0.0;
    }
    stats::mean(&shortfalls).sqrt() * params.period().volatility_scale()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::regress;
    use approx::assert_relative_eq;
    use core_types::AnalysisPeriod;
    use proptest::prelude::*;

    fn params() -> AnalysisParams {
        AnalysisParams::new(AnalysisPeriod::Monthly, 2.4, 95.0).unwrap()
    }

    #[test]
    fn volatility_is_annualized_by_root_twelve() {
        let portfolio = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let benchmark = [0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5, -0.5, 0.5, -0.5];
        let mut advisories = Vec::new();
        let risk = RiskMetrics::compute(
            &portfolio,
            &benchmark,
            &benchmark,
            2.0,
            &params(),
            &AnalysisSettings::default(),
            &mut advisories,
        )
        .unwrap();

        let per_period = stats::sample_std_dev(&portfolio);
        assert_relative_eq!(risk.portfolio_volatility, per_period * 12f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(risk.benchmark_volatility * 2.0, risk.portfolio_volatility, epsilon = 1e-12);
        assert_relative_eq!(risk.tracking_error, risk.benchmark_volatility, epsilon = 1e-12);
        assert_eq!(risk.total_risk, risk.portfolio_volatility);
    }

    #[test]
    fn excess_beta_is_clamped_and_flagged() {
        let portfolio = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let mut advisories = Vec::new();
        let risk = RiskMetrics::compute(
            &portfolio,
            &portfolio,
            &portfolio,
            1.5,
            &params(),
            &AnalysisSettings::default(),
            &mut advisories,
        )
        .unwrap();

        assert_eq!(risk.idiosyncratic_risk, 0.0);
        assert!(matches!(
            advisories.as_slice(),
            [Advisory::RiskDecompositionWarning { shortfall }] if *shortfall > 0.0
        ));
    }

    #[test]
    fn no_shortfall_means_zero_downside_deviation() {
        let returns = [1.0, 2.0, 3.0, 1.5];
        assert_eq!(downside_deviation(&returns, &params()), 0.0);

        let mixed = [-0.8, 2.0, 3.0, -1.8];
        // Target is 0.2% per period: shortfalls of 1.0 and 2.0.
        let expected = ((1.0 + 4.0) / 2.0_f64).sqrt() * 12f64.sqrt();
        assert_relative_eq!(downside_deviation(&mixed, &params()), expected, epsilon = 1e-12);
    }

    #[test]
    fn decomposition_follows_the_regression_factor() {
        let portfolio = [2.1, -1.5, 3.2, 0.8, 1.9, 2.5, -0.8, 1.2, 2.8, 0.5, 1.6, 2.3];
        let benchmark = [1.8, -2.1, 2.9, 0.5, 1.6, 2.1, -1.2, 0.8, 2.2, 0.3, 1.2, 1.9];
        let market: Vec<f64> = benchmark.iter().map(|b| b * 0.5).collect();

        let on_benchmark = regress(&portfolio, &benchmark, &params()).unwrap();
        let on_market = regress(&portfolio, &market, &params()).unwrap();
        let settings = AnalysisSettings::default();

        let mut advisories = Vec::new();
        let baseline = RiskMetrics::compute(
            &portfolio,
            &benchmark,
            &benchmark,
            on_benchmark.beta,
            &params(),
            &settings,
            &mut advisories,
        )
        .unwrap();
        let factored = RiskMetrics::compute(
            &portfolio,
            &benchmark,
            &market,
            on_market.beta,
            &params(),
            &settings,
            &mut advisories,
        )
        .unwrap();

        // A rescaled factor doubles beta and halves the factor volatility.
        assert_relative_eq!(factored.factor_volatility * 2.0, baseline.factor_volatility, epsilon = 1e-9);
        assert_relative_eq!(factored.systematic_risk, baseline.systematic_risk, epsilon = 1e-9);
        assert_relative_eq!(factored.idiosyncratic_risk, baseline.idiosyncratic_risk, epsilon = 1e-9);
        assert_relative_eq!(factored.benchmark_volatility, baseline.benchmark_volatility);
        assert_relative_eq!(factored.tracking_error, baseline.tracking_error);
        assert!(advisories.is_empty());
    }

    proptest! {
        #[test]
        fn decomposition_sums_to_total_variance(
            pairs in prop::collection::vec((-20.0f64..20.0, -20.0f64..20.0), 12..48),
        ) {
            let portfolio: Vec<f64> = pairs.iter().map(|(p, _)| *p).collect();
            let benchmark: Vec<f64> = pairs.iter().map(|(_, b)| *b).collect();
            prop_assume!(stats::sample_variance(&benchmark) > 1e-3);

            let regression = regress(&portfolio, &benchmark, &params()).unwrap();
            let mut advisories = Vec::new();
            let risk = RiskMetrics::compute(
                &portfolio,
                &benchmark,
                &benchmark,
                regression.beta,
                &params(),
                &AnalysisSettings::default(),
                &mut advisories,
            )
            .unwrap();

            let total_variance = risk.total_risk * risk.total_risk;
            prop_assert!(risk.idiosyncratic_risk >= 0.0);
            prop_assert!(risk.systematic_risk >= 0.0);
            prop_assert!(
                (risk.systematic_risk + risk.idiosyncratic_risk - total_variance).abs()
                    <= 1e-9 * total_variance.max(1.0)
            );
        }
    }
}
