use analytics::AnalyticsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollingError {
    #[error(
        "Invalid rolling window {window}: must be at least {min_window} and less than the {observations} available observations"
    )]
    InvalidRollingWindow {
        window: usize,
        observations: usize,
        min_window: usize,
    },

    #[error("Rolling window ending at period {period_index} failed: {source}")]
    Window {
        period_index: usize,
        #[source]
        source: AnalyticsError,
    },

    #[error("Rolling analysis was cancelled before the window ending at period {period_index}.")]
    Cancelled { period_index: usize },
}
