//! Logger configuration
//!
//! Output routing is environment driven: in production (`RUN_ENV=prod`)
//! events go to the daily log file only, elsewhere to the console as well.
//! `LOG_LEVEL` optionally sets the initial process level.

use super::error::{LoggerError, Result};
use super::level_resolver::DEFAULT_PROCESS_LEVEL;
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable selecting the deployment environment
pub const ENV_RUN_ENV: &str = "RUN_ENV";

/// Environment variable holding the initial process level
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// `RUN_ENV` value that disables console output
pub const PRODUCTION_ENV: &str = "prod";

/// Directory daily log files are written to by default
pub const DEFAULT_LOG_DIR: &str = "./run_log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub process_level: LogLevel,
    pub log_dir: PathBuf,
    pub console: bool,
    pub file: bool,
    pub use_colors: bool,
    pub timestamp_format: TimestampFormat,
    pub console_format: OutputFormat,
    pub file_format: OutputFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            process_level: DEFAULT_PROCESS_LEVEL,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            console: true,
            file: true,
            use_colors: true,
            timestamp_format: TimestampFormat::Standard,
            console_format: OutputFormat::Text,
            file_format: OutputFormat::Json,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration derived from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration derived from an arbitrary variable lookup.
    ///
    /// Unparseable `LOG_LEVEL` values are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_event_logger::{LoggerConfig, LogLevel};
    ///
    /// let config = LoggerConfig::from_lookup(|key| match key {
    ///     "RUN_ENV" => Some("prod".to_string()),
    ///     "LOG_LEVEL" => Some("warn".to_string()),
    ///     _ => None,
    /// });
    /// assert!(!config.console);
    /// assert!(config.file);
    /// assert_eq!(config.process_level, LogLevel::Warn);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if lookup(ENV_RUN_ENV).is_some_and(|env| env.trim() == PRODUCTION_ENV) {
            config.console = false;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL).and_then(|raw| raw.parse::<LogLevel>().ok()) {
            if !level.is_unset() {
                config.process_level = level;
            }
        }

        config
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_process_level(mut self, level: LogLevel) -> Self {
        self.process_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_file(mut self, enabled: bool) -> Self {
        self.file = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Check the configuration can produce a working logger
    pub fn validate(&self) -> Result<()> {
        if !self.console && !self.file {
            return Err(LoggerError::config(
                "LoggerConfig",
                "at least one of console or file output must be enabled",
            ));
        }
        if !self.timestamp_format.is_valid() {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("invalid timestamp format: {:?}", self.timestamp_format),
            ));
        }
        if self.file && self.log_dir.as_os_str().is_empty() {
            return Err(LoggerError::config(
                "LoggerConfig",
                "log_dir must not be empty when file output is enabled",
            ));
        }
        Ok(())
    }
}
