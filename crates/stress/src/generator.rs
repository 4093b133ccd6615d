use crate::error::StressError;
use core_types::ScenarioSpec;
use itertools::Itertools;

/// The scenario set run when a request names none.
pub fn default_scenarios() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec::new("Baseline", 1.0),
        ScenarioSpec::new("Market +20%", 1.2),
        ScenarioSpec::new("Market -20%", 0.8),
        ScenarioSpec::new("High Correlation", 1.0).with_correlation_shock(0.5),
        ScenarioSpec::new("Low Correlation", 1.0).with_correlation_shock(-0.5),
    ]
}

/// Generates every combination of the given market and correlation shocks.
///
/// A correlation shock of zero produces a pure market scenario.
pub fn scenario_grid(
    market_shocks: &[f64],
    correlation_shocks: &[f64],
) -> Result<Vec<ScenarioSpec>, StressError> {
    if market_shocks.is_empty() || correlation_shocks.is_empty() {
        return Err(StressError::ScenarioGeneration(
            "Both shock axes need at least one level.".to_string(),
        ));
    }

    let scenarios = market_shocks
        .iter()
        .cartesian_product(correlation_shocks)
        .map(|(&market, &correlation)| {
            let name = format!("Market x{:.2} / Correlation {:+.2}", market, correlation);
            let spec = ScenarioSpec::new(name, market);
            if correlation == 0.0 {
                spec
            } else {
                spec.with_correlation_shock(correlation)
            }
        })
        .collect();

    Ok(scenarios)
}
