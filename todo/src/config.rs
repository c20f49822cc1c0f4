//! Configuration for the todo store and its terminal front end.
//!
//! Values come from environment variables, with defaults for everything:
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `TODO_SEED` | `sample` or `empty` | `sample` |
//! | `TODO_LOG` | `tracing` filter directive (falls back to `RUST_LOG`) | `info` |
//! | `TODO_MAX_DISPATCH_DEPTH` | follow-up actions allowed per operation | `32` |

use composable_todo_runtime::config::DEFAULT_MAX_DISPATCH_DEPTH;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `TODO_SEED` holds something other than `sample` or `empty`
    #[error("invalid seed {0:?}, expected \"sample\" or \"empty\"")]
    InvalidSeed(String),

    /// A numeric variable could not be parsed or is out of range
    #[error("invalid value {value:?} for {var}")]
    InvalidNumber {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Initial contents of a new store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seed {
    /// The six sample items
    #[default]
    Sample,
    /// No items
    Empty,
}

impl FromStr for Seed {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(Self::Sample),
            "empty" => Ok(Self::Empty),
            _ => Err(ConfigError::InvalidSeed(s.to_string())),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sample => write!(f, "sample"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Todo store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoConfig {
    /// Initial contents
    pub seed: Seed,
    /// `tracing` filter directive
    pub log_filter: String,
    /// Follow-up actions allowed per operation
    pub max_dispatch_depth: usize,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            seed: Seed::Sample,
            log_filter: "info".to_string(),
            max_dispatch_depth: DEFAULT_MAX_DISPATCH_DEPTH,
        }
    }
}

impl TodoConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from any variable source
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set to an invalid value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(seed) = lookup("TODO_SEED") {
            config.seed = seed.parse()?;
        }

        if let Some(filter) = lookup("TODO_LOG").or_else(|| lookup("RUST_LOG")) {
            config.log_filter = filter;
        }

        if let Some(depth) = lookup("TODO_MAX_DISPATCH_DEPTH") {
            // `submit` needs room for its one follow-up action
            config.max_dispatch_depth = depth
                .trim()
                .parse()
                .ok()
                .filter(|&depth: &usize| depth >= 1)
                .ok_or_else(|| ConfigError::InvalidNumber {
                    var: "TODO_MAX_DISPATCH_DEPTH",
                    value: depth.clone(),
                })?;
        }

        Ok(config)
    }
}
