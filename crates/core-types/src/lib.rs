//! # Jensen Core Types
//!
//! The shared vocabulary of the workspace: the analysis request record, the sampling
//! period, stress scenario specifications and the advisory conditions that travel
//! alongside computed results.
//!
//! As a Layer 0 crate it has no knowledge of any calculation. Every other crate depends
//! on it, so nothing here may depend on them.

pub mod advisory;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use advisory::Advisory;
pub use enums::{AnalysisPeriod, RatioKind, SeriesKind};
pub use error::CoreError;
pub use structs::{AnalysisRequest, ConfidenceInterval, ScenarioSpec};
