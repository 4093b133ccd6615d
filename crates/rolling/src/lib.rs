//! # Rolling Window Analyzer
//!
//! Re-runs the regression and Sharpe computation over every window of a fixed length,
//! sliding one period at a time, to show how alpha and beta drift through the history.
//!
//! Window positions are independent, so `RollingAnalyzer::run` dispatches them to the
//! rayon pool once there are enough of them, while `RollingAnalyzer::iter` walks them lazily.

use analytics::{AnalyticsEngine, ValidatedSeries};
use configuration::{AnalysisSettings, Parallelism};
use core_types::Advisory;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

pub mod cancel;
pub mod error;

pub use cancel::CancellationToken;
pub use error::RollingError;

/// The statistics of one window, keyed by the index of its last period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingPoint {
    pub period_index: usize,
    pub alpha: f64,
    pub beta: f64,
    pub sharpe_ratio: f64,
}

/// One evaluated window together with the advisories its ratios raised.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOutcome {
    pub point: RollingPoint,
    pub advisories: Vec<Advisory>,
}

/// The ordered output of a rolling run: one point per window position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingSeries {
    pub window: usize,
    pub points: Vec<RollingPoint>,
    /// Distinct advisories raised by any window, in first-seen order.
    pub advisories: Vec<Advisory>,
}

impl RollingSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// What to do about rolling analysis for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowPlan {
    Run(usize),
    /// The series is too short for the implicit window; carries the advisory to attach.
    Skip(Advisory),
}

/// Decides the window length.
///
/// An explicit window must lie in `[min_observations, observations)`. Without one, the
/// default is shortened to `observations - 1` when needed, and rolling is skipped if that
/// falls below the minimum.
pub fn plan_window(
    requested: Option<usize>,
    observations: usize,
    settings: &AnalysisSettings,
) -> Result<WindowPlan, RollingError> {
    match requested {
        Some(window) => {
            if window < settings.min_observations || window >= observations {
                return Err(RollingError::InvalidRollingWindow {
                    window,
                    observations,
                    min_window: settings.min_observations,
                });
            }
            Ok(WindowPlan::Run(window))
        }
        None => {
            let window = settings
                .default_rolling_window
                .min(observations.saturating_sub(1));
            if window < settings.min_observations {
                Ok(WindowPlan::Skip(Advisory::RollingSkipped {
                    observations,
                    window,
                }))
            } else {
                Ok(WindowPlan::Run(window))
            }
        }
    }
}

/// Sliding-window analysis over a validated pair of series.
#[derive(Debug, Clone)]
pub struct RollingAnalyzer<'a> {
    engine: &'a AnalyticsEngine,
    portfolio: &'a [f64],
    factor: &'a [f64],
    window: usize,
    parallelism: Parallelism,
}

impl<'a> RollingAnalyzer<'a> {
    pub fn new(
        engine: &'a AnalyticsEngine,
        series: &'a ValidatedSeries,
        window: usize,
        parallelism: Parallelism,
    ) -> Result<Self, RollingError> {
        let observations = series.len();
        let min_window = engine.settings().min_observations;
        if window < min_window || window >= observations {
            return Err(RollingError::InvalidRollingWindow {
                window,
                observations,
                min_window,
            });
        }
        Ok(Self {
            engine,
            portfolio: series.portfolio(),
            factor: series.factor(),
            window,
            parallelism,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of window positions: `n - w + 1`.
    pub fn len(&self) -> usize {
        self.portfolio.len() - self.window + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A lazy walk over the windows in index order, each with its own advisories. Unlike
    /// [`run`](Self::run) nothing is deduplicated. Clone it to restart from the same point.
    pub fn iter(&self) -> Windows<'_, 'a> {
        Windows {
            analyzer: self,
            start: 0,
        }
    }

    /// Computes every window, checking `token` before each one.
    ///
    /// Windows run on the rayon pool once their count reaches the parallelism threshold;
    /// the output is in index order either way.
    #[tracing::instrument(
        name = "rolling_run",
        skip(self, token),
        fields(window = self.window, observations = self.portfolio.len())
    )]
    pub fn run(&self, token: &CancellationToken) -> Result<RollingSeries, RollingError> {
        let total = self.len();
        let evaluate = |start: usize| {
            if token.is_cancelled() {
                return Err(RollingError::Cancelled {
                    period_index: self.period_index(start),
                });
            }
            self.evaluate(start)
        };

        let results: Vec<WindowOutcome> =
            if self.parallelism.should_parallelize(total) {
                tracing::debug!(total, threads = rayon::current_num_threads(), "Running windows in parallel.");
                (0..total).into_par_iter().map(evaluate).collect::<Result<_, _>>()?
            } else {
                (0..total).map(evaluate).collect::<Result<_, _>>()?
            };

        let mut points = Vec::with_capacity(total);
        let mut advisories: Vec<Advisory> = Vec::new();
        for outcome in results {
            points.push(outcome.point);
            for advisory in outcome.advisories {
                if !advisories.contains(&advisory) {
                    advisories.push(advisory);
                }
            }
        }

        tracing::info!(windows = points.len(), "Rolling analysis complete.");
        Ok(RollingSeries {
            window: self.window,
            points,
            advisories,
        })
    }

    fn period_index(&self, start: usize) -> usize {
        start + self.window - 1
    }

    fn evaluate(&self, start: usize) -> Result<WindowOutcome, RollingError> {
        let end = start + self.window;
        let period_index = self.period_index(start);
        let snapshot = self
            .engine
            .calculate_window(&self.portfolio[start..end], &self.factor[start..end])
            .map_err(|source| RollingError::Window {
                period_index,
                source,
            })?;
        let point = RollingPoint {
            period_index,
            alpha: snapshot.regression.alpha,
            beta: snapshot.regression.beta,
            sharpe_ratio: snapshot.sharpe_ratio,
        };
        Ok(WindowOutcome {
            point,
            advisories: snapshot.advisories,
        })
    }
}

/// Lazy iterator over window positions, created by [`RollingAnalyzer::iter`].
#[derive(Debug, Clone)]
pub struct Windows<'r, 'a> {
    analyzer: &'r RollingAnalyzer<'a>,
    start: usize,
}

impl Iterator for Windows<'_, '_> {
    type Item = Result<WindowOutcome, RollingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.analyzer.len() {
            return None;
        }
        let item = self.analyzer.evaluate(self.start);
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.analyzer.len().saturating_sub(self.start);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Windows<'_, '_> {}
