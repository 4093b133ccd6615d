use analytics::AnalyticsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RatingError {
    #[error("Could not derive a critical value for the significance test: {0}")]
    CriticalValue(#[from] AnalyticsError),
}
