use analytics::AnalyticsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StressError {
    #[error("Invalid scenario '{name}': {reason}")]
    InvalidScenario { name: String, reason: String },

    #[error("Scenario '{name}' failed: {source}")]
    Scenario {
        name: String,
        #[source]
        source: AnalyticsError,
    },

    #[error("Scenario generation failed: {0}")]
    ScenarioGeneration(String),
}
