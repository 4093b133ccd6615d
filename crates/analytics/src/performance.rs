use crate::params::AnalysisParams;
use crate::regression::RegressionResult;
use crate::risk::RiskMetrics;
use crate::stats::{self, VARIANCE_EPSILON};
use configuration::AnalysisSettings;
use core_types::{Advisory, RatioKind};
use serde::{Deserialize, Serialize};

/// Risk-adjusted performance. Ratios share the annual basis of [`RiskMetrics`];
/// returns are in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub treynor_ratio: f64,
    pub information_ratio: f64,
    pub calmar_ratio: f64,
    pub omega_ratio: f64,
    pub up_capture_ratio: f64,
    pub down_capture_ratio: f64,
    /// Compounded return over the whole series.
    pub total_return: f64,
    /// Compound annual growth rate.
    pub annualized_return: f64,
    /// Mean per-period return over the benchmark.
    pub excess_return: f64,
    pub benchmark_sharpe_ratio: f64,
}

/// Divides with a fallback to the configured sentinels, recording an advisory whenever
/// the fallback is used.
struct RatioGuard<'a> {
    settings: &'a AnalysisSettings,
    advisories: &'a mut Vec<Advisory>,
}

impl RatioGuard<'_> {
    /// `unbounded` marks ratios whose zero denominator means "infinitely good" rather than
    /// "undefined"; those report `ratio_cap` (signed) when the numerator is non-zero.
    fn divide(&mut self, ratio: RatioKind, numerator: f64, denominator: f64, unbounded: bool) -> f64 {
        if denominator.abs() > VARIANCE_EPSILON {
            return numerator / denominator;
        }
        let sentinel = if unbounded && numerator.abs() > VARIANCE_EPSILON {
            self.settings.ratio_cap.copysign(numerator)
        } else {
            self.settings.undefined_ratio
        };
        self.flag(ratio, sentinel)
    }

    fn flag(&mut self, ratio: RatioKind, sentinel: f64) -> f64 {
        tracing::debug!(%ratio, sentinel, "Ratio denominator is zero; reporting sentinel.");
        self.advisories.push(Advisory::RatioUndefined { ratio, sentinel });
        sentinel
    }
}

impl PerformanceMetrics {
    pub fn compute(
        portfolio: &[f64],
        benchmark: &[f64],
        regression: &RegressionResult,
        risk: &RiskMetrics,
        params: &AnalysisParams,
        settings: &AnalysisSettings,
        advisories: &mut Vec<Advisory>,
    ) -> Self {
        let ppy = params.periods_per_year();
        let rf = params.risk_free_per_period();
        let mut guard = RatioGuard {
            settings,
            advisories,
        };

        let annual_excess = (stats::mean(portfolio) - rf) * ppy;
        let active: Vec<f64> = portfolio.iter().zip(benchmark).map(|(p, b)| p - b).collect();
        let excess_return = stats::mean(&active);

        let sharpe_ratio = guard.divide(
            RatioKind::Sharpe,
            annual_excess,
            risk.portfolio_volatility,
            false,
        );
        let sortino_ratio = guard.divide(
            RatioKind::Sortino,
            annual_excess,
            risk.downside_deviation,
            true,
        );
        let treynor_ratio = guard.divide(RatioKind::Treynor, annual_excess, regression.beta, false);
        let information_ratio = guard.divide(
            RatioKind::Information,
            excess_return * ppy,
            risk.tracking_error,
            false,
        );

        let growth = stats::compound_growth(portfolio);
        let total_return = (growth - 1.0) * 100.0;
        let annualized_return = annualized_return(growth, portfolio.len(), ppy);
        let calmar_ratio = guard.divide(
            RatioKind::Calmar,
            annualized_return,
            risk.max_drawdown,
            true,
        );

        let (gains, losses) = portfolio.iter().fold((0.0, 0.0), |(g, l), r| {
            if *r > rf {
                (g + (r - rf), l)
            } else {
                (g, l + (rf - r))
            }
        });
        let omega_ratio = guard.divide(RatioKind::Omega, gains, losses, true);

        let up_capture_ratio = capture_ratio(portfolio, benchmark, |b| b > 0.0)
            .unwrap_or_else(|| guard.flag(RatioKind::UpCapture, settings.undefined_ratio));
        let down_capture_ratio = capture_ratio(portfolio, benchmark, |b| b < 0.0)
            .unwrap_or_else(|| guard.flag(RatioKind::DownCapture, settings.undefined_ratio));

        let benchmark_sharpe_ratio = if risk.benchmark_volatility > VARIANCE_EPSILON {
            (stats::mean(benchmark) - rf) * ppy / risk.benchmark_volatility
        } else {
            settings.undefined_ratio
        };

        Self {
            sharpe_ratio,
            sortino_ratio,
            treynor_ratio,
            information_ratio,
            calmar_ratio,
            omega_ratio,
            up_capture_ratio,
            down_capture_ratio,
            total_return,
            annualized_return,
            excess_return,
            benchmark_sharpe_ratio,
        }
    }
}

/// Annualized Sharpe ratio of a single series. Used on its own by the rolling analyzer.
pub fn sharpe_ratio(
    returns: &[f64],
    params: &AnalysisParams,
    settings: &AnalysisSettings,
    advisories: &mut Vec<Advisory>,
) -> f64 {
    let annual_excess = (stats::mean(returns) - params.risk_free_per_period()) * params.periods_per_year();
    let volatility = stats::sample_std_dev(returns) * params.period().volatility_scale();
    RatioGuard {
        settings,
        advisories,
    }
    .divide(RatioKind::Sharpe, annual_excess, volatility, false)
}

/// Compound annual growth rate in percent, from the total growth factor over `periods`.
pub fn annualized_return(growth: f64, periods: usize, periods_per_year: f64) -> f64 {
    if periods == 0 || growth <= 0.0 {
        return -100.0;
    }
    (growth.powf(periods_per_year / periods as f64) - 1.0) * 100.0
}

/// Mean portfolio return over mean benchmark return, on the periods selected by
/// `condition` applied to the benchmark, times 100. `None` when no period qualifies.
fn capture_ratio(portfolio: &[f64], benchmark: &[f64], condition: impl Fn(f64) -> bool) -> Option<f64> {
    let (p_sum, b_sum, count) = portfolio
        .iter()
        .zip(benchmark)
        .filter(|(_, b)| condition(**b))
        .fold((0.0, 0.0, 0usize), |(ps, bs, c), (p, b)| (ps + p, bs + b, c + 1));
    if count == 0 {
        return None;
    }
    let benchmark_mean = b_sum / count as f64;
    if benchmark_mean.abs() < VARIANCE_EPSILON {
        return None;
    }
    Some((p_sum / count as f64) / benchmark_mean * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regression::regress;
    use approx::assert_relative_eq;
    use core_types::AnalysisPeriod;

    const PORTFOLIO: [f64; 12] = [2.1, -1.5, 3.2, 0.8, 1.9, 2.5, -0.8, 1.2, 2.8, 0.5, 1.6, 2.3];
    const BENCHMARK: [f64; 12] = [1.8, -2.1, 2.9, 0.5, 1.6, 2.1, -1.2, 0.8, 2.2, 0.3, 1.2, 1.9];

    fn params() -> AnalysisParams {
        AnalysisParams::new(AnalysisPeriod::Monthly, 2.5, 95.0).unwrap()
    }

    fn compute(portfolio: &[f64], benchmark: &[f64]) -> (PerformanceMetrics, Vec<Advisory>) {
        let settings = AnalysisSettings::default();
        let mut advisories = Vec::new();
        let regression = regress(portfolio, benchmark, &params()).unwrap();
        let risk = RiskMetrics::compute(
            portfolio,
            benchmark,
            benchmark,
            regression.beta,
            &params(),
            &settings,
            &mut advisories,
        )
        .unwrap();
        let metrics = PerformanceMetrics::compute(
            portfolio,
            benchmark,
            &regression,
            &risk,
            &params(),
            &settings,
            &mut advisories,
        );
        (metrics, advisories)
    }

    #[test]
    fn reference_example_yields_finite_ratios() {
        let (metrics, _) = compute(&PORTFOLIO, &BENCHMARK);
        assert!(metrics.sharpe_ratio.is_finite());
        assert_relative_eq!(metrics.sharpe_ratio, 2.8487, epsilon = 1e-3);
        assert!(metrics.sortino_ratio > 0.0);
        assert!(metrics.up_capture_ratio > 100.0);
        assert!(metrics.down_capture_ratio < 100.0);
        assert!(metrics.total_return > 0.0);
        assert_relative_eq!(metrics.excess_return, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn sharpe_helper_matches_the_full_computation() {
        let (metrics, _) = compute(&PORTFOLIO, &BENCHMARK);
        let mut advisories = Vec::new();
        let sharpe = sharpe_ratio(&PORTFOLIO, &params(), &AnalysisSettings::default(), &mut advisories);
        assert_relative_eq!(sharpe, metrics.sharpe_ratio, epsilon = 1e-12);
        assert!(advisories.is_empty());
    }

    #[test]
    fn no_losses_caps_sortino_and_omega() {
        let portfolio: Vec<f64> = (0..12).map(|i| 1.0 + (i % 3) as f64).collect();
        let benchmark: Vec<f64> = (0..12).map(|i| 0.5 + (i % 4) as f64 * 0.5).collect();
        let (metrics, advisories) = compute(&portfolio, &benchmark);

        assert_eq!(metrics.sortino_ratio, 999.0);
        assert_eq!(metrics.omega_ratio, 999.0);
        assert_eq!(metrics.calmar_ratio, 999.0);
        assert!(advisories.contains(&Advisory::RatioUndefined {
            ratio: RatioKind::Sortino,
            sentinel: 999.0
        }));
        // The benchmark never falls, so the down-capture conditioning set is empty.
        assert_eq!(metrics.down_capture_ratio, 0.0);
        assert!(advisories.contains(&Advisory::RatioUndefined {
            ratio: RatioKind::DownCapture,
            sentinel: 0.0
        }));
    }

    #[test]
    fn zero_beta_reports_undefined_treynor() {
        // Portfolio built orthogonal to the benchmark: beta is exactly zero.
        let benchmark = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let portfolio = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];
        let (metrics, advisories) = compute(&portfolio, &benchmark);
        assert_eq!(metrics.treynor_ratio, 0.0);
        assert!(advisories.contains(&Advisory::RatioUndefined {
            ratio: RatioKind::Treynor,
            sentinel: 0.0
        }));
    }

    #[test]
    fn annualized_return_compounds() {
        // 1% a month for a year.
        let growth = 1.01f64.powi(12);
        assert_relative_eq!(annualized_return(growth, 12, 12.0), (growth - 1.0) * 100.0, epsilon = 1e-12);
        assert_relative_eq!(annualized_return(1.21, 24, 12.0), 10.0, epsilon = 1e-9);
        assert_eq!(annualized_return(0.0, 12, 12.0), -100.0);
    }

    #[test]
    fn capture_ratio_conditions_on_benchmark_sign() {
        let portfolio = [2.0, -1.0, 4.0, -3.0];
        let benchmark = [1.0, -2.0, 2.0, -2.0];
        assert_relative_eq!(capture_ratio(&portfolio, &benchmark, |b| b > 0.0).unwrap(), 200.0);
        assert_relative_eq!(capture_ratio(&portfolio, &benchmark, |b| b < 0.0).unwrap(), 100.0);
        assert!(capture_ratio(&portfolio, &[0.0; 4], |b| b > 0.0).is_none());
    }
}
