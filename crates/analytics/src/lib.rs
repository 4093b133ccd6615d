//! # Jensen Analytics Engine
//!
//! The numeric core: validation of return series, single-factor regression, risk measures,
//! risk-adjusted performance ratios and attribution.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure logic crate with no knowledge of external systems. It depends
//!   only on `core-types` and `configuration` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` takes aligned return series as input and
//!   produces an `AnalyticsReport`. Every building block (`regress`, `RiskMetrics::compute`,
//!   `PerformanceMetrics::compute`) is also usable on its own.
//! - **Fatal vs. advisory:** Failures that make a result meaningless are `AnalyticsError`s;
//!   conditions that only qualify a result are `Advisory` values attached to it.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: runs the full pipeline, or the reduced per-window computation.
//! - `SeriesValidator` / `ValidatedSeries`: input checks and the immutable checked snapshot.
//! - `AnalysisParams`: period, risk-free rate and confidence level of a request.
//! - `AnalyticsReport`: regression, risk, performance and attribution for one pass.
//! - `AnalyticsError`: the fatal conditions.

pub mod attribution;
pub mod engine;
pub mod error;
pub mod params;
pub mod performance;
pub mod regression;
pub mod report;
pub mod risk;
pub mod stats;
pub mod validator;

pub use attribution::{Attribution, BenchmarkComparison, ComparisonLine};
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use params::AnalysisParams;
pub use performance::PerformanceMetrics;
pub use regression::{RegressionResult, regress};
pub use report::{AnalyticsReport, WindowSnapshot};
pub use risk::RiskMetrics;
pub use validator::{SeriesValidator, ValidatedSeries};
