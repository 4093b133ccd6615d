use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisSettings, Config, Parallelism, PerformanceThresholds, RatingThresholds, RecommendationRules,
    RiskThresholds, SignificanceLevels,
};

/// The prefix for environment overrides, e.g. `JENSEN__ANALYSIS__RATIO_CAP=500`.
const ENV_PREFIX: &str = "JENSEN";

/// Loads the engine configuration from the `config.toml` file in the working directory.
///
/// The file is optional: every section falls back to its defaults. Environment variables
/// prefixed with `JENSEN__` override file values. The result is validated before it is
/// returned.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name("config.toml").required(false))
}

/// Loads the engine configuration from an explicit file path. The file must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    build(config::File::from(path.as_ref()).required(true))
}

/// Parses a TOML document directly. Mostly useful for tests and embedding.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    build(config::File::from_str(toml, config::FileFormat::Toml))
}

fn build<S>(source: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(source)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
