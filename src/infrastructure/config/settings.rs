//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Every
//! section is optional; missing values fall back to documented defaults.
//!
//! # Example
//!
//! ```no_run
//! use codemine::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("codemine.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::data::{RecommendConfig, StoreConfig, TransactionsConfig};
use super::logging::LoggingConfig;
use super::mining::MiningConfig;
use crate::error::{ConfigError, Result};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "CODEMINE_CONFIG";

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Mining thresholds and budget.
    #[serde(default)]
    pub mining: MiningConfig,

    /// Transaction log location and layout.
    #[serde(default)]
    pub transactions: TransactionsConfig,

    /// Rule store location and startup policy.
    #[serde(default)]
    pub store: StoreConfig,

    /// Serving options.
    #[serde(default)]
    pub recommend: RecommendConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a value cannot be represented in TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let mining = &self.mining;
        if !(mining.min_support > 0.0 && mining.min_support <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "min_support",
                reason: "must be greater than 0 and at most 1".to_string(),
            }
            .into());
        }
        if !(0.0..=1.0).contains(&mining.min_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "min_confidence",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if mining.max_itemset_len == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_itemset_len",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if mining.max_candidates == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_candidates",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.transactions.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "transactions.path",
            }
            .into());
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "store.path",
            }
            .into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::file::TransactionFormat;
    use crate::application::mining::builder::RebuildPolicy;
    use crate::error::Error;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.mining.min_support, 0.05);
        assert_eq!(config.mining.min_confidence, 0.6);
        assert_eq!(config.mining.max_candidates, 1_000_000);
        assert_eq!(config.store.rebuild, RebuildPolicy::Reuse);
        assert_eq!(config.recommend.coverage_examples, 3);
    }

    #[test]
    fn parses_every_section() {
        let config = Config::parse_toml(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [mining]
            min_support = 0.1
            min_confidence = 0.8
            max_itemset_len = 3
            max_candidates = 5000

            [transactions]
            path = "data/baskets.csv"
            format = "basket"

            [store]
            path = "out/rules.json"
            rebuild = "rebuild"

            [recommend]
            coverage_examples = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.mining.max_itemset_len, Some(3));
        assert_eq!(config.transactions.format, TransactionFormat::Basket);
        assert_eq!(config.store.rebuild, RebuildPolicy::Rebuild);
        assert_eq!(config.recommend.coverage_examples, 5);

        let params = config.mining.to_params();
        assert_eq!(params.limits.max_candidates, 5000);
        assert_eq!(params.min_confidence, 0.8);
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        for (toml, field) in [
            ("[mining]\nmin_support = 0.0", "min_support"),
            ("[mining]\nmin_support = 1.5", "min_support"),
            ("[mining]\nmin_confidence = -0.1", "min_confidence"),
            ("[mining]\nmax_itemset_len = 0", "max_itemset_len"),
            ("[mining]\nmax_candidates = 0", "max_candidates"),
        ] {
            match Config::parse_toml(toml) {
                Err(Error::Config(ConfigError::InvalidValue { field: f, .. })) => {
                    assert_eq!(f, field)
                }
                other => panic!("{toml}: expected invalid {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = Config::parse_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_rebuild_policy() {
        let err = Config::parse_toml("[store]\nrebuild = \"sometimes\"").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn rendered_toml_parses_back() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert_eq!(Config::parse_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = Config::load("/nonexistent/codemine.toml").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
    }
}
