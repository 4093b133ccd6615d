use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Rolling analysis error: {0}")]
    Rolling(#[from] rolling::RollingError),

    #[error("Stress testing error: {0}")]
    Stress(#[from] stress::StressError),

    #[error("Rating error: {0}")]
    Rating(#[from] rating::RatingError),
}

impl From<configuration::error::ConfigError> for EngineError {
    fn from(error: configuration::error::ConfigError) -> Self {
        EngineError::Configuration(error.to_string())
    }
}
