//! Configuration utilities for the demo application.

use std::env;
use std::num::ParseIntError;

use log::LevelFilter;
use semver::Version;
use thiserror::Error;

pub const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");

const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref APP_VERSION: Version = Version::parse(APP_VERSION_STR)
        .unwrap_or_else(|_| Version::new(0, 0, 0));
}

/// Environment variable overriding the number of rounds.
pub const ROUNDS_VAR: &str = "KOKIRI_ROUNDS";

/// Environment variable overriding the log level.
pub const LOG_VAR: &str = "KOKIRI_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`KOKIRI_ROUNDS` must be a non-negative number: {0}")]
    Rounds(#[from] ParseIntError),

    #[error("`KOKIRI_LOG` has unknown log level `{0}`")]
    LogLevel(String),
}

/// This struct represents general configuration of the application.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    rounds: u32,
    log_level: LevelFilter,
}

impl Config {
    /// Creates new configuration with given name, version, number of rounds and log level.
    pub const fn new(name: String, version: Version, rounds: u32, log_level: LevelFilter) -> Self {
        Self {
            name,
            version,
            rounds,
            log_level,
        }
    }

    /// Default configuration with overrides taken from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if some variable is set to a malformed value.
    ///
    pub fn from_env() -> Result<Self, ConfigError> {
        let rounds = env::var(ROUNDS_VAR).ok();
        let log_level = env::var(LOG_VAR).ok();
        Self::default().with_overrides(rounds.as_deref(), log_level.as_deref())
    }

    fn with_overrides(
        mut self,
        rounds: Option<&str>,
        log_level: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if let Some(rounds) = rounds {
            self.rounds = rounds.trim().parse()?;
        }
        if let Some(log_level) = log_level {
            self.log_level = log_level
                .trim()
                .parse()
                .map_err(|_| ConfigError::LogLevel(log_level.to_owned()))?;
        }
        Ok(self)
    }

    /// Name of the application.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of the application.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// How many rounds the world will be ticked through.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

impl Default for Config {
    fn default() -> Self {
        let log_level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self::new(APP_NAME.to_string(), APP_VERSION.clone(), 3, log_level)
    }
}
