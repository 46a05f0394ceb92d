//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event severity, ordered from least to most severe.
///
/// `Unset` marks "no explicit value" (for example a request context that
/// carries no override) and is never used as a filtering threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Unset = 0,
    Trace = 1,
    Debug = 2,
    Info = 3,
    Notice = 4,
    Warn = 5,
    Error = 6,
    Fatal = 7,
}

impl LogLevel {
    /// All levels that can be emitted, least severe first.
    pub const EMITTABLE: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Notice,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Unset => "UNSET",
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    #[inline]
    pub fn is_unset(&self) -> bool {
        matches!(self, LogLevel::Unset)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Unset | LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Notice => Cyan,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
            LogLevel::Fatal => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UNSET" => Ok(LogLevel::Unset),
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "NOTICE" => Ok(LogLevel::Notice),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(LogLevel::Unset),
            1 => Ok(LogLevel::Trace),
            2 => Ok(LogLevel::Debug),
            3 => Ok(LogLevel::Info),
            4 => Ok(LogLevel::Notice),
            5 => Ok(LogLevel::Warn),
            6 => Ok(LogLevel::Error),
            7 => Ok(LogLevel::Fatal),
            _ => Err(format!("Invalid log level value: {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(LogLevel::Unset < LogLevel::Trace);
        assert!(LogLevel::Info < LogLevel::Notice);
        assert!(LogLevel::Notice < LogLevel::Warn);
        assert!(LogLevel::Error < LogLevel::Fatal);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" notice ".parse::<LogLevel>(), Ok(LogLevel::Notice));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_try_from_u8() {
        for level in LogLevel::EMITTABLE {
            assert_eq!(LogLevel::try_from(level as u8), Ok(level));
        }
        assert_eq!(
            LogLevel::try_from(8),
            Err("Invalid log level value: 8".to_string())
        );
        assert_eq!(LogLevel::try_from(0), Ok(LogLevel::Unset));
    }

    #[test]
    fn test_default_is_unset() {
        assert!(LogLevel::default().is_unset());
    }
}
