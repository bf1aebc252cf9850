//! Configuration for facility location evaluation.
//!
//! Load evaluation settings from TOML or YAML files to control the
//! infeasibility penalty and batch evaluation threading without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use cflp_config::{CflpConfig, PenaltyConfig, ThreadCount};
//!
//! let config = CflpConfig::from_toml_str(r#"
//!     evaluation_thread_count = { count = 4 }
//!
//!     [penalty]
//!     type = "fixed"
//!     coefficient = 1e6
//! "#).unwrap();
//!
//! assert_eq!(config.penalty, PenaltyConfig::Fixed { coefficient: 1e6 });
//! assert_eq!(config.evaluation_thread_count, ThreadCount::Count(4));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use cflp_config::CflpConfig;
//!
//! let config = CflpConfig::load("cflp.toml").unwrap_or_default();
//! // Proceeds with the automatic penalty if the file doesn't exist
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main evaluation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CflpConfig {
    /// How capacity overflow is converted into objective penalty.
    #[serde(default)]
    pub penalty: PenaltyConfig,

    /// Number of threads for batch evaluation.
    #[serde(default)]
    pub evaluation_thread_count: ThreadCount,
}

impl CflpConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML,
    /// or fails [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Uses a fixed penalty coefficient instead of the instance-derived one.
    pub fn with_penalty_coefficient(mut self, coefficient: f64) -> Self {
        self.penalty = PenaltyConfig::Fixed { coefficient };
        self
    }

    /// Sets the batch evaluation thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.evaluation_thread_count = thread_count;
        self
    }

    /// Checks values serde cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.penalty.validate()?;
        self.evaluation_thread_count.validate()
    }
}

/// Infeasibility penalty policy.
///
/// The objective of an infeasible assignment is
/// `raw_cost + coefficient * total_overflow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PenaltyConfig {
    /// Derive the coefficient from the instance: one more than the largest
    /// cost any complete assignment can incur.
    ///
    /// Any overflow of at least one unit then outweighs every cost
    /// difference between assignments. Smaller fractional overflow may not:
    /// an infeasible assignment can still get a lower objective than a
    /// feasible one. Compare lexicographic scores when that matters.
    #[default]
    Auto,

    /// Use the given coefficient for every instance.
    Fixed { coefficient: f64 },
}

impl PenaltyConfig {
    /// Returns the coefficient for an instance whose costs are bounded by
    /// `cost_upper_bound`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the resulting coefficient is not
    /// finite and positive, for example when the instance costs are so large
    /// that their bound overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use cflp_config::PenaltyConfig;
    ///
    /// assert_eq!(PenaltyConfig::Auto.coefficient(15.0).unwrap(), 16.0);
    /// assert_eq!(PenaltyConfig::Fixed { coefficient: 1e9 }.coefficient(15.0).unwrap(), 1e9);
    /// assert!(PenaltyConfig::Auto.coefficient(f64::INFINITY).is_err());
    /// ```
    pub fn coefficient(&self, cost_upper_bound: f64) -> Result<f64, ConfigError> {
        match self {
            PenaltyConfig::Auto => {
                let coefficient = cost_upper_bound + 1.0;
                if coefficient.is_finite() && coefficient > 0.0 {
                    Ok(coefficient)
                } else {
                    Err(ConfigError::Invalid(format!(
                        "automatic penalty coefficient needs a finite cost bound, got {}",
                        cost_upper_bound
                    )))
                }
            }
            PenaltyConfig::Fixed { coefficient } => check_coefficient(*coefficient),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            PenaltyConfig::Auto => Ok(()),
            PenaltyConfig::Fixed { coefficient } => check_coefficient(*coefficient).map(|_| ()),
        }
    }
}

/// Accepts finite, strictly positive penalty coefficients.
pub fn check_coefficient(coefficient: f64) -> Result<f64, ConfigError> {
    if coefficient.is_finite() && coefficient > 0.0 {
        Ok(coefficient)
    } else {
        Err(ConfigError::Invalid(format!(
            "penalty coefficient must be finite and positive, got {}",
            coefficient
        )))
    }
}

/// Batch evaluation thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use the shared rayon pool.
    #[default]
    Auto,

    /// Evaluate batches sequentially on the calling thread.
    None,

    /// Use a dedicated pool with this many threads.
    Count(usize),
}

impl ThreadCount {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ThreadCount::Count(0) => Err(ConfigError::Invalid(
                "evaluation thread count must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
