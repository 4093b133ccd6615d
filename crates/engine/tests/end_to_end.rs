use analytics::AnalyticsError;
use approx::assert_relative_eq;
use configuration::Config;
use core_types::{Advisory, AnalysisPeriod, AnalysisRequest, ScenarioSpec};
use engine::{AlphaBetaEngine, EngineError};
use rating::PerformanceRating;
use rolling::{CancellationToken, RollingError};
use stress::StressError;

const PORTFOLIO: [f64; 12] = [2.1, -1.5, 3.2, 0.8, 1.9, 2.5, -0.8, 1.2, 2.8, 0.5, 1.6, 2.3];
const BENCHMARK: [f64; 12] = [1.8, -2.1, 2.9, 0.5, 1.6, 2.1, -1.2, 0.8, 2.2, 0.3, 1.2, 1.9];

fn reference_request() -> AnalysisRequest {
    AnalysisRequest::new(PORTFOLIO.to_vec(), BENCHMARK.to_vec())
        .with_risk_free_rate(2.5)
        .with_period(AnalysisPeriod::Monthly)
}

/// Three years of monthly data with a loose relationship to the benchmark.
fn long_request(n: usize) -> AnalysisRequest {
    let benchmark: Vec<f64> = (0..n).map(|i| (i as f64 * 0.9).sin() * 3.0 + 0.6).collect();
    let portfolio: Vec<f64> = benchmark
        .iter()
        .enumerate()
        .map(|(i, b)| 0.9 * b + (i as f64 * 2.3).cos() * 1.2 + 0.2)
        .collect();
    AnalysisRequest::new(portfolio, benchmark).with_risk_free_rate(2.0)
}

fn engine() -> AlphaBetaEngine {
    AlphaBetaEngine::new(Config::default()).unwrap()
}

#[test]
fn reference_example_end_to_end() {
    let output = engine().analyze(&reference_request()).unwrap();

    assert!((0.9..=1.3).contains(&output.regression.beta));
    assert!((0.0..=1.0).contains(&output.regression.r_squared));
    assert!(output.performance.sharpe_ratio.is_finite());
    assert!(matches!(
        output.rating.performance_rating,
        PerformanceRating::Excellent
            | PerformanceRating::Good
            | PerformanceRating::Average
            | PerformanceRating::Poor
            | PerformanceRating::VeryPoor
    ));

    // Twelve observations leave no room for the implicit rolling window.
    assert!(output.rolling.is_none());
    assert!(output.advisories.contains(&Advisory::RollingSkipped {
        observations: 12,
        window: 11
    }));
    assert!(
        output
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::SuspiciousCorrelation { .. }))
    );

    // The built-in scenario set runs when none is requested.
    let names: Vec<&str> = output.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        ["Baseline", "Market +20%", "Market -20%", "High Correlation", "Low Correlation"]
    );
    assert_eq!(output.scenarios[0].beta, output.regression.beta);
}

#[test]
fn output_serializes_to_camel_case_json() {
    let output = engine().analyze(&reference_request()).unwrap();
    let json = serde_json::to_value(&output).unwrap();

    assert!(json["regression"]["rSquared"].is_number());
    assert!(json["regression"]["confidenceInterval"]["lower"].is_number());
    assert!(json["performance"]["upCaptureRatio"].is_number());
    assert!(json["benchmarkComparison"]["sharpeRatio"]["difference"].is_number());
    assert!(json["rating"]["recommendation"].is_string());
    assert!(json["rolling"].is_null());
    assert_eq!(json["advisories"][1]["kind"], "rollingSkipped");
}

#[test]
fn request_parses_from_camel_case_json() {
    let json = r#"{
        "portfolioReturns": [2.1, -1.5, 3.2, 0.8, 1.9, 2.5, -0.8, 1.2, 2.8, 0.5, 1.6, 2.3],
        "benchmarkReturns": [1.8, -2.1, 2.9, 0.5, 1.6, 2.1, -1.2, 0.8, 2.2, 0.3, 1.2, 1.9],
        "riskFreeRate": 2.5,
        "analysisPeriod": "monthly",
        "confidenceLevel": 90,
        "stressTestScenarios": [{ "name": "Crash", "marketShock": 0.5 }]
    }"#;
    let request: AnalysisRequest = serde_json::from_str(json).unwrap();
    let output = engine().analyze(&request).unwrap();

    assert_eq!(output.regression.confidence_level, 90.0);
    assert_eq!(output.scenarios.len(), 1);
    assert_eq!(output.scenarios[0].name, "Crash");
}

#[test]
fn long_history_produces_a_full_rolling_series() {
    let request = long_request(36).with_rolling_window(24);
    let output = engine().analyze(&request).unwrap();

    let rolling = output.rolling.unwrap();
    assert_eq!(rolling.window, 24);
    assert_eq!(rolling.points.len(), 36 - 24 + 1);
    assert_eq!(rolling.points[0].period_index, 23);
    assert_eq!(rolling.points.last().unwrap().period_index, 35);
}

#[test]
fn market_factor_rescaling_leaves_the_risk_split_unchanged() {
    let without = engine().analyze(&long_request(36)).unwrap();
    let market: Vec<f64> = long_request(36)
        .benchmark_returns
        .iter()
        .map(|b| b * 0.5)
        .collect();
    let with = engine()
        .analyze(&long_request(36).with_market_returns(market))
        .unwrap();

    assert_relative_eq!(with.regression.beta, without.regression.beta * 2.0, epsilon = 1e-9);
    assert_relative_eq!(with.risk.factor_volatility * 2.0, without.risk.factor_volatility, epsilon = 1e-9);
    assert_relative_eq!(with.risk.benchmark_volatility, without.risk.benchmark_volatility);
    assert_relative_eq!(with.risk.tracking_error, without.risk.tracking_error);
    assert_relative_eq!(with.risk.systematic_risk, without.risk.systematic_risk, epsilon = 1e-9);
    assert_relative_eq!(with.risk.idiosyncratic_risk, without.risk.idiosyncratic_risk, epsilon = 1e-9);
    assert_relative_eq!(
        with.attribution.systematic_volatility,
        without.attribution.systematic_volatility,
        epsilon = 1e-9
    );
    assert_relative_eq!(
        with.attribution.idiosyncratic_volatility,
        without.attribution.idiosyncratic_volatility,
        epsilon = 1e-9
    );

    assert_eq!(with.advisories, without.advisories);
    let decomposition_warnings = with
        .advisories
        .iter()
        .chain(with.scenarios.iter().flat_map(|s| &s.advisories))
        .filter(|a| matches!(a, Advisory::RiskDecompositionWarning { .. }))
        .count();
    assert_eq!(decomposition_warnings, 0);
}

#[test]
fn implicit_window_is_shortened_to_fit() {
    let output = engine().analyze(&long_request(20)).unwrap();
    let rolling = output.rolling.unwrap();
    assert_eq!(rolling.window, 19);
    assert_eq!(rolling.points.len(), 2);
}

#[test]
fn short_series_is_insufficient() {
    let request = AnalysisRequest::new(PORTFOLIO[..11].to_vec(), BENCHMARK[..11].to_vec());
    assert_eq!(
        engine().analyze(&request),
        Err(EngineError::Analytics(AnalyticsError::InsufficientData {
            required: 12,
            actual: 11
        }))
    );
}

#[test]
fn mismatched_lengths_are_rejected() {
    let request = AnalysisRequest::new(vec![1.0; 5], vec![1.0; 6]);
    assert!(matches!(
        engine().analyze(&request),
        Err(EngineError::Analytics(AnalyticsError::LengthMismatch { .. }))
    ));
}

#[test]
fn extreme_returns_are_rejected() {
    let mut portfolio = PORTFOLIO.to_vec();
    portfolio[3] = 150.0;
    let request = AnalysisRequest::new(portfolio, BENCHMARK.to_vec());
    assert!(matches!(
        engine().analyze(&request),
        Err(EngineError::Analytics(AnalyticsError::ExtremeValue { index: 3, .. }))
    ));
}

#[test]
fn flat_benchmark_is_degenerate() {
    let request = AnalysisRequest::new(PORTFOLIO.to_vec(), vec![0.5; 12]);
    assert!(matches!(
        engine().analyze(&request),
        Err(EngineError::Analytics(AnalyticsError::DegenerateBenchmark { .. }))
    ));
}

#[test]
fn explicit_window_out_of_range_is_fatal() {
    let request = long_request(20).with_rolling_window(20);
    assert!(matches!(
        engine().analyze(&request),
        Err(EngineError::Rolling(RollingError::InvalidRollingWindow { .. }))
    ));
}

#[test]
fn confidence_level_out_of_range_is_fatal() {
    let request = reference_request().with_confidence_level(75.0);
    assert!(matches!(
        engine().analyze(&request),
        Err(EngineError::Analytics(AnalyticsError::InvalidParameter { .. }))
    ));
}

#[test]
fn bad_scenario_is_fatal() {
    let request = reference_request()
        .with_scenarios(vec![ScenarioSpec::new("Blend", 1.0).with_correlation_shock(2.0)]);
    assert!(matches!(
        engine().analyze(&request),
        Err(EngineError::Stress(StressError::InvalidScenario { .. }))
    ));
}

#[test]
fn cancelled_rolling_run_aborts_the_analysis() {
    let token = CancellationToken::new();
    token.cancel();
    let result = engine().analyze_with_cancellation(&long_request(36), &token);
    assert!(matches!(
        result,
        Err(EngineError::Rolling(RollingError::Cancelled { .. }))
    ));
}

#[test]
fn analysis_is_deterministic() {
    let request = long_request(48);
    let first = engine().analyze(&request).unwrap();
    let second = engine().analyze(&request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn yearly_data_uses_unit_annualization() {
    let request = long_request(24).with_period(AnalysisPeriod::Yearly);
    let output = engine().analyze(&request).unwrap();
    assert_relative_eq!(output.regression.alpha_annualized, output.regression.alpha);
}

#[test]
fn invalid_configuration_is_rejected() {
    let mut config = Config::default();
    config.rating.risk.low = 2.0;
    assert!(matches!(
        AlphaBetaEngine::new(config),
        Err(EngineError::Configuration(_))
    ));
}
